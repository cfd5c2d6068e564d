//! Test utilities for committee-core
//!
//! Provides rosters and solutions shared by the test modules of this crate
//! and, through the `test-utils` feature, of the scoring and server crates.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::{CommitteeSolution, Person, PersonType, Range, Settings, SolverOptions};

/// Time slots every roster participant is available in.
pub const SLOTS: [&str; 3] = ["Monday", "Tuesday", "Wednesday"];

/// A zero-violation pairing: (evaluated, professional, professional, non-professional).
///
/// No row evaluates its own subject, no two rows evaluate each other, every
/// professional sits on exactly two committees and every non-professional on
/// at most three.
pub const ROSTER: [(&str, &str, &str, &str); 37] = [
    ("Léo", "Isaac", "Emma", "Mathilde"),
    ("Raphaël", "Ethan", "Rose", "Assia"),
    ("Louis", "Mia", "Jules", "Clémence"),
    ("Jade", "Marius", "Mohamed", "Sohan"),
    ("Adam", "Mohamed", "Isaac", "Maya"),
    ("Lucas", "Arthur", "Mia", "Oscar"),
    ("Emma", "Alice", "Tom", "Oscar"),
    ("Gabriel", "Inès", "Sacha", "Théa"),
    ("Alice", "Agathe", "Marius", "Livia"),
    ("Arthur", "Inaya", "Ambre", "Livia"),
    ("Ambre", "Tom", "Mael", "Yasmine"),
    ("Jules", "Adam", "Inaya", "Ibrahim"),
    ("Lina", "Zoé", "Jade", "Apolline"),
    ("Mael", "Aaron", "Hugo", "Gaspard"),
    ("Hugo", "Emma", "Ambre", "Théa"),
    ("Chloé", "Liam", "Arthur", "Yasmine"),
    ("Noah", "Chloé", "Inès", "Gaspard"),
    ("Rose", "Mael", "Léo", "Iris"),
    ("Liam", "Paul", "Gabin", "Iris"),
    ("Gabin", "Rose", "Noah", "Clémence"),
    ("Sacha", "Tiago", "Liam", "Valentine"),
    ("Paul", "Romy", "Sacha", "Roxane"),
    ("Mia", "Jade", "Romy", "Gaspard"),
    ("Nathan", "Lucas", "Léo", "Alba"),
    ("Aaron", "Raphaël", "Tiago", "Roxane"),
    ("Anna", "Louis", "Aaron", "Alba"),
    ("Mohamed", "Nathan", "Agathe", "Clémence"),
    ("Ethan", "Noah", "Louis", "Valentine"),
    ("Tom", "Gabriel", "Nathan", "Apolline"),
    ("Romy", "Anna", "Lina", "Simon"),
    ("Inès", "Paul", "Ethan", "Iris"),
    ("Tiago", "Lina", "Chloé", "Maya"),
    ("Isaac", "Gabriel", "Anna", "Clara"),
    ("Agathe", "Zoé", "Adam", "Livia"),
    ("Marius", "Gabin", "Lucas", "Apolline"),
    ("Inaya", "Hugo", "Raphaël", "Clara"),
    ("Zoé", "Jules", "Alice", "Théa"),
];

/// Creates a professional available in every slot of [`SLOTS`].
pub fn professional(name: &str) -> Person {
    Person::new(name, PersonType::Professional).with_availability(SLOTS)
}

/// Creates a non-professional available in every slot of [`SLOTS`].
pub fn non_professional(name: &str) -> Person {
    Person::new(name, PersonType::NonProfessional).with_availability(SLOTS)
}

/// Builds a solution without shuffling, panicking on invalid rosters.
pub fn build(settings: Settings, participants: Vec<Person>) -> CommitteeSolution {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    CommitteeSolution::build_with_rng(
        "test",
        SolverOptions {
            settings,
            participants,
        },
        &mut rng,
    )
    .expect("valid roster")
}

/// Settings matching [`ROSTER`]: two professionals and one non-professional
/// per committee, 12 or 13 committees per slot.
pub fn roster_settings() -> Settings {
    Settings {
        nb_pro_participants: Range::new(2, 2),
        number_of_assignments_for_a_professional: Range::new(2, 2),
        nb_non_pro_participants: Range::new(1, 1),
        number_of_assignments_for_a_non_professional: Range::new(1, 3),
        committee_meeting_size: Range::new(12, 13),
        ..Settings::default()
    }
}

/// Participants of [`ROSTER`]: evaluated persons are the professionals.
pub fn roster_participants() -> Vec<Person> {
    let mut persons: Vec<Person> = ROSTER
        .iter()
        .map(|(evaluated, ..)| {
            professional(evaluated)
                .with_skills(["audit"])
                .with_required_skills(["audit"])
                .needing_evaluation()
        })
        .collect();

    let mut seen = HashSet::new();
    for (.., non_pro) in ROSTER {
        if seen.insert(non_pro) {
            persons.push(non_professional(non_pro));
        }
    }
    persons
}

/// The roster built with every committee and slot assigned as in [`ROSTER`].
pub fn roster_solution() -> CommitteeSolution {
    let mut solution = build(roster_settings(), roster_participants());
    for (i, (evaluated, pro1, pro2, non_pro)) in ROSTER.iter().enumerate() {
        for evaluator in [pro1, pro2, non_pro] {
            solution
                .assign_by_name(evaluator, evaluated)
                .expect("free slot");
        }
        solution
            .schedule_by_name(evaluated, SLOTS[i % SLOTS.len()])
            .expect("known slot");
    }
    solution
}

/// P1 evaluated by the professionals P2 and P3.
pub fn staffing_solution(non_pro_range: Range) -> CommitteeSolution {
    let settings = Settings {
        nb_pro_participants: Range::new(2, 2),
        nb_non_pro_participants: non_pro_range,
        ..Settings::default()
    };
    let participants = vec![
        professional("P1").needing_evaluation(),
        professional("P2"),
        professional("P3"),
    ];
    let mut solution = build(settings, participants);
    solution.assign_by_name("P2", "P1").expect("free slot");
    solution.assign_by_name("P3", "P1").expect("free slot");
    solution
}
