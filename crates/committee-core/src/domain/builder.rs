//! Derives the entity graph of a [`CommitteeSolution`] from a roster.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::assignment::CommitteeAssignment;
use super::committee::Committee;
use super::settings::DEFAULT_ASSIGNMENTS_RANGE;
use super::solution::{CommitteeSolution, SolverOptions};
use super::values::TimeSlot;
use crate::error::{CommitteeError, Result};

impl CommitteeSolution {
    /// Builds the problem for `options`, shuffling with the thread RNG when
    /// the settings ask for it.
    ///
    /// # Errors
    ///
    /// Returns [`CommitteeError::DuplicatePersonName`] if two participants
    /// share a name, ignoring case, [`CommitteeError::InvalidRange`] for a
    /// negative or inverted settings range, and
    /// [`CommitteeError::TooManyAssignments`] when a participant would get
    /// more slots than there are committees (or than the default allowance,
    /// whichever is larger).
    pub fn new(id: impl Into<String>, options: SolverOptions) -> Result<Self> {
        Self::build_with_rng(id, options, &mut rand::rng())
    }

    /// Same as [`CommitteeSolution::new`] with a caller supplied RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(
        id: impl Into<String>,
        options: SolverOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let SolverOptions {
            settings,
            participants: mut persons,
        } = options;

        settings.validate()?;

        let mut names = HashSet::with_capacity(persons.len());
        for person in &persons {
            if !names.insert(person.name.to_lowercase()) {
                return Err(CommitteeError::DuplicatePersonName(person.name.clone()));
            }
        }

        for person in &mut persons {
            person.init(&settings);
        }

        let mut seen = HashSet::new();
        let time_slots: Vec<TimeSlot> = persons
            .iter()
            .flat_map(|p| p.availability.iter())
            .filter(|t| t.is_named() && seen.insert((*t).clone()))
            .cloned()
            .collect();

        let committees: Vec<Committee> = persons
            .iter()
            .enumerate()
            .filter(|(_, p)| p.needs_evaluation)
            .map(|(i, p)| Committee::new(p.name.clone(), i))
            .collect();

        let limit = committees.len().max(DEFAULT_ASSIGNMENTS_RANGE.max() as usize);
        if let Some(person) = persons
            .iter()
            .find(|p| p.number_of_assignments_range.max() > limit as i64)
        {
            return Err(CommitteeError::TooManyAssignments {
                person: person.name.clone(),
                requested: person.number_of_assignments_range.max(),
                limit,
            });
        }

        let mut next_id = 0u64;
        let mut assignments = Vec::new();
        for (i, person) in persons.iter().enumerate() {
            for _ in 0..person.number_of_assignments_range.max() {
                assignments.push(CommitteeAssignment::new(next_id, i));
                next_id += 1;
            }
        }
        if settings.shuffles_participants() {
            assignments.shuffle(rng);
        }

        Ok(CommitteeSolution::from_parts(
            id.into(),
            Arc::new(settings),
            persons,
            time_slots,
            committees,
            assignments,
        ))
    }
}
