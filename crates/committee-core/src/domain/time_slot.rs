//! Time slot capacity checks.

use super::settings::Settings;
use super::values::TimeSlot;

impl TimeSlot {
    /// True if `nb_committees` meeting in this slot respects the configured
    /// committee meeting size.
    pub fn is_number_of_committees_in_range(
        &self,
        settings: &Settings,
        nb_committees: i64,
    ) -> bool {
        settings.committee_meeting_size.contains(nb_committees)
    }

    /// True for slots the builder should keep: a non-empty name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}
