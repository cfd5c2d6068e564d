//! Participants: evaluators, evaluated persons, or both.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::settings::{Settings, DEFAULT_ASSIGNMENTS_RANGE, DEFAULT_TRAVELLING_DISTANCE_RANGE};
use super::values::{hash_name, same_name, Location, PersonType, Range, Skill, TimeSlot};

/// A schedulable participant.
///
/// Identity is the name, compared without regard to case. The two ranges at
/// the bottom are not part of the wire format: the problem builder copies them
/// from [`Settings`] through [`Person::init`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,

    #[serde(default)]
    pub person_type: PersonType,

    #[serde(default)]
    pub skills: Vec<Skill>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub availability: Vec<TimeSlot>,

    /// Skills the committee evaluating this person must cover.
    #[serde(default)]
    pub required_skills: Vec<Skill>,

    #[serde(default)]
    pub needs_evaluation: bool,

    /// Names of participants this person must not meet as evaluator or evaluated.
    #[serde(default, with = "name_list")]
    pub vetoes: Vec<String>,

    /// Previously evaluated names per round; round 0 is the most recent one.
    #[serde(default)]
    pub has_already_inspected: Vec<Vec<String>>,

    #[serde(default)]
    pub max_number_of_inspections: Option<i64>,

    #[serde(skip, default = "default_assignments_range")]
    pub number_of_assignments_range: Range,

    #[serde(skip, default = "default_travelling_distance_range")]
    pub travelling_distance_range: Range,
}

fn default_assignments_range() -> Range {
    DEFAULT_ASSIGNMENTS_RANGE
}

fn default_travelling_distance_range() -> Range {
    DEFAULT_TRAVELLING_DISTANCE_RANGE
}

impl Person {
    pub fn new(name: impl Into<String>, person_type: PersonType) -> Self {
        Self {
            name: name.into(),
            person_type,
            skills: Vec::new(),
            location: None,
            availability: Vec::new(),
            required_skills: Vec::new(),
            needs_evaluation: false,
            vetoes: Vec::new(),
            has_already_inspected: Vec::new(),
            max_number_of_inspections: None,
            number_of_assignments_range: DEFAULT_ASSIGNMENTS_RANGE,
            travelling_distance_range: DEFAULT_TRAVELLING_DISTANCE_RANGE,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Skill::new).collect();
        self
    }

    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills = skills.into_iter().map(Skill::new).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(Location::new(location));
        self
    }

    pub fn with_availability<I, S>(mut self, time_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability = time_slots.into_iter().map(TimeSlot::new).collect();
        self
    }

    pub fn with_vetoes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vetoes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inspection history, most recent round first.
    pub fn with_history(mut self, rounds: Vec<Vec<&str>>) -> Self {
        self.has_already_inspected = rounds
            .into_iter()
            .map(|round| round.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    pub fn with_max_inspections(mut self, max: i64) -> Self {
        self.max_number_of_inspections = Some(max);
        self
    }

    pub fn needing_evaluation(mut self) -> Self {
        self.needs_evaluation = true;
        self
    }

    /// Copies the per-person ranges derived from the problem settings.
    ///
    /// Must be called on each person before scoring; the problem builder does it.
    pub fn init(&mut self, settings: &Settings) {
        self.number_of_assignments_range = settings.number_of_assignments_range(self.person_type);
        self.travelling_distance_range = settings.travelling_distance_range;
    }

    pub fn has_skill(&self, skill: &Skill) -> bool {
        self.skills.contains(skill)
    }

    /// An unset time slot is never available.
    pub fn is_available(&self, time_slot: Option<&TimeSlot>) -> bool {
        time_slot.is_some_and(|t| self.availability.contains(t))
    }

    /// True if either person lists the other as a veto.
    pub fn is_vetoed(&self, other: &Person) -> bool {
        self.vetoes.iter().any(|v| same_name(v, &other.name))
            || other.vetoes.iter().any(|v| same_name(v, &self.name))
    }

    /// True if `evaluated` appears in any round before the most recent one.
    pub fn has_already_inspected_in_the_past(&self, evaluated: &Person) -> bool {
        self.has_already_inspected.len() > 1
            && self.has_already_inspected[1..]
                .iter()
                .any(|round| round_contains(round, &evaluated.name))
    }

    /// True if `evaluated` appears in the most recent round.
    pub fn has_already_inspected_last_time(&self, evaluated: &Person) -> bool {
        self.has_already_inspected
            .first()
            .is_some_and(|round| round_contains(round, &evaluated.name))
    }

    pub fn is_not_travelling_in_range(&self, distance: i64) -> bool {
        !self.travelling_distance_range.contains(distance)
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(Location::name)
    }
}

fn round_contains(round: &[String], name: &str) -> bool {
    round.iter().any(|n| same_name(n, name))
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        same_name(&self.name, &other.name)
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_name(&self.name, state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person: {}", self.name)
    }
}

/// Serializes a list of names as `[{ "name": ... }]`.
mod name_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::domain::values::NameRepr;

    pub fn serialize<S: Serializer>(names: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        names
            .iter()
            .map(|name| NameRepr { name: name.clone() })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let refs = Vec::<NameRepr>::deserialize(deserializer)?;
        Ok(refs.into_iter().map(|r| r.name).collect())
    }
}
