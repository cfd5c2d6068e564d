//! One scenario per constraint: each breaks exactly that constraint.

use std::collections::HashMap;

use committee_core::test_utils::{build, non_professional, professional};
use committee_core::{CommitteeSolution, DistanceMatrix, Person, PersonType, Range, Settings};

use super::*;
use crate::constraint::match_counts;
use crate::director::CommitteeScoreDirector;

/// Ann is evaluated by every other participant, on Monday.
fn committee_of_ann(settings: Settings, persons: Vec<Person>) -> CommitteeSolution {
    let evaluators: Vec<String> = persons[1..].iter().map(|p| p.name.clone()).collect();
    let mut solution = build(settings, persons);
    for evaluator in &evaluators {
        solution.assign_by_name(evaluator, "Ann").unwrap();
    }
    solution.schedule_by_name("Ann", "Monday").unwrap();
    solution
}

fn ann_bob_cid() -> Vec<Person> {
    vec![
        professional("Ann").needing_evaluation(),
        professional("Bob"),
        professional("Cid"),
    ]
}

/// Ann and Dan are each evaluated by Bob and Cid, Ann on Monday.
fn committees_of_ann_and_dan(
    settings: Settings,
    bob: Person,
    cid: Person,
    dan_slot: &str,
) -> CommitteeSolution {
    let persons = vec![
        professional("Ann").with_location("Paris").needing_evaluation(),
        professional("Dan").with_location("Paris").needing_evaluation(),
        bob,
        cid,
    ];
    let mut solution = build(settings, persons);
    for evaluated in ["Ann", "Dan"] {
        solution.assign_by_name("Bob", evaluated).unwrap();
        solution.assign_by_name("Cid", evaluated).unwrap();
    }
    solution.schedule_by_name("Ann", "Monday").unwrap();
    solution.schedule_by_name("Dan", dan_slot).unwrap();
    solution
}

fn paris_lyon(distance: i64, travelling_distance_range: Range) -> Settings {
    Settings {
        distance_matrix: Some(DistanceMatrix::new(
            vec!["Paris".into(), "Lyon".into()],
            vec![vec![Some(0), Some(distance)], vec![Some(distance), Some(0)]],
        )),
        travelling_distance_range,
        ..Settings::default()
    }
}

fn assert_only(solution: &CommitteeSolution, name: &str, expected: usize) {
    let counts: HashMap<String, usize> = match_counts(&committee_constraints(), solution);
    for (constraint, count) in &counts {
        let wanted = if constraint == name { expected } else { 0 };
        assert_eq!(*count, wanted, "constraint ({constraint}) in {counts:?}");
    }
}

#[test]
fn test_catalog_order_and_weights() {
    let constraints = committee_constraints();
    let names: Vec<&str> = constraints.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            SELF_CONFLICT,
            DUPLICATED_EVALUATOR,
            MAX_PROFESSIONAL,
            MIN_PROFESSIONAL,
            MAX_NON_PROFESSIONAL,
            MIN_NON_PROFESSIONAL,
            NOT_ENOUGH_AVAILABLE_EVALUATORS,
            EVALUATED_NOT_AVAILABLE,
            REQUIRED_SKILLS,
            NON_RECIPROCITY,
            INSPECTION_ROTATION,
            INSPECTION_FOLLOW_UP,
            VETO,
            TRAVELLING_DISTANCE,
            MAX_INSPECTIONS,
            COMMITTEES_PER_TIME_SLOT,
        ]
    );
    let hard: Vec<i64> = constraints.iter().map(|c| c.impact().hard()).collect();
    assert_eq!(
        hard,
        vec![
            -1_000_000, -1_000_000, -1_000, -100, -1_000, -100, -2, -2, -2, -100, -1, -1, -1, -1,
            -1, -1
        ]
    );
    assert!(constraints.iter().all(|c| c.weight.medium() == 0 && c.weight.soft() == 0));
}

#[test]
fn test_baseline_has_no_match() {
    let solution = committee_of_ann(Settings::default(), ann_bob_cid());
    let counts = match_counts(&committee_constraints(), &solution);
    assert!(counts.values().all(|&c| c == 0), "{counts:?}");
}

#[test]
fn test_duplicated_evaluator() {
    let mut solution = committee_of_ann(Settings::default(), ann_bob_cid());
    solution.assign_by_name("Bob", "Ann").unwrap();
    assert_only(&solution, DUPLICATED_EVALUATOR, 1);
}

#[test]
fn test_professional_staffing() {
    let too_many = Settings {
        nb_pro_participants: Range::new(0, 1),
        ..Settings::default()
    };
    assert_only(&committee_of_ann(too_many, ann_bob_cid()), MAX_PROFESSIONAL, 1);

    let too_few = Settings {
        nb_pro_participants: Range::new(3, 3),
        ..Settings::default()
    };
    assert_only(&committee_of_ann(too_few, ann_bob_cid()), MIN_PROFESSIONAL, 1);
}

#[test]
fn test_non_professional_staffing() {
    let none_allowed = Settings {
        nb_non_pro_participants: Range::new(0, 0),
        ..Settings::default()
    };
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob"),
        non_professional("Dan"),
    ];
    assert_only(&committee_of_ann(none_allowed, persons), MAX_NON_PROFESSIONAL, 1);

    let one_required = Settings {
        nb_non_pro_participants: Range::new(1, 1),
        ..Settings::default()
    };
    assert_only(&committee_of_ann(one_required, ann_bob_cid()), MIN_NON_PROFESSIONAL, 1);
}

#[test]
fn test_availability() {
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob"),
        Person::new("Cid", PersonType::Professional).with_availability(["Tuesday"]),
    ];
    assert_only(
        &committee_of_ann(Settings::default(), persons),
        NOT_ENOUGH_AVAILABLE_EVALUATORS,
        1,
    );

    let persons = vec![
        Person::new("Ann", PersonType::Professional)
            .with_availability(["Tuesday"])
            .needing_evaluation(),
        professional("Bob"),
        professional("Cid"),
    ];
    assert_only(&committee_of_ann(Settings::default(), persons), EVALUATED_NOT_AVAILABLE, 1);
}

#[test]
fn test_unscheduled_committee_fails_availability() {
    let mut solution = committee_of_ann(Settings::default(), ann_bob_cid());
    solution.set_time_slot(0, None);
    let counts = match_counts(&committee_constraints(), &solution);
    assert_eq!(counts[NOT_ENOUGH_AVAILABLE_EVALUATORS], 1);
    assert_eq!(counts[EVALUATED_NOT_AVAILABLE], 1);

    solution.settings_mut().use_availability = Some(false);
    assert!(match_counts(&committee_constraints(), &solution).values().all(|&c| c == 0));
}

#[test]
fn test_required_skills_explanation() {
    let persons = vec![
        professional("Ann").with_required_skills(["law"]).needing_evaluation(),
        professional("Bob"),
        professional("Cid"),
    ];
    let solution = committee_of_ann(Settings::default(), persons);
    assert_only(&solution, REQUIRED_SKILLS, 1);

    let explanation = CommitteeScoreDirector::new(solution).explain();
    let expected = "\
Explanation of score (-2hard/0medium/0soft):
    Constraint match totals:
        -2hard/0medium/0soft: constraint (Required skills) has 1 match(es):
            -2hard/0medium/0soft: justifications ([Committee for: Person: Ann (Ann)])
";
    assert_eq!(explanation.to_string(), expected);
}

#[test]
fn test_non_reciprocity() {
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob").needing_evaluation(),
        professional("Cid"),
    ];
    let mut solution = committee_of_ann(Settings::default(), persons);
    solution.assign_by_name("Ann", "Bob").unwrap();
    solution.assign_by_name("Cid", "Bob").unwrap();
    solution.schedule_by_name("Bob", "Monday").unwrap();
    // One match from each side of the relationship.
    assert_only(&solution, NON_RECIPROCITY, 2);

    let mut director = CommitteeScoreDirector::new(solution);
    assert_eq!(director.calculate_score(), HardMediumSoftScore::of_hard(-200));
    let ann = director.working_solution().person_index("Ann").unwrap();
    let ann_on_bob = director.working_solution().assignments_of_person(ann)[0];
    director.change_committee(ann_on_bob, None);

    let solution = director.working_solution().clone();
    let counts = match_counts(&committee_constraints(), &solution);
    assert_eq!(counts[NON_RECIPROCITY], 0);
    assert_eq!(director.score(), CommitteeScoreDirector::new(solution).calculate_score());
}

#[test]
fn test_inspection_history() {
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob").with_history(vec![vec![], vec!["Ann"]]),
        professional("Cid"),
    ];
    assert_only(&committee_of_ann(Settings::default(), persons), INSPECTION_ROTATION, 1);

    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob").with_history(vec![vec!["Ann"]]),
        professional("Cid"),
    ];
    assert_only(&committee_of_ann(Settings::default(), persons), INSPECTION_FOLLOW_UP, 1);
}

#[test]
fn test_veto() {
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob"),
        professional("Cid").with_vetoes(["ann"]),
    ];
    assert_only(&committee_of_ann(Settings::default(), persons), VETO, 1);
}

#[test]
fn test_travelling_distance() {
    let settings = Settings {
        distance_matrix: Some(DistanceMatrix::new(
            vec!["Paris".into(), "Lyon".into()],
            vec![vec![Some(0), Some(465)], vec![Some(465), Some(0)]],
        )),
        ..Settings::default()
    };
    let persons = vec![
        professional("Ann").with_location("Paris").needing_evaluation(),
        professional("Bob").with_location("Lyon"),
        professional("Cid"),
    ];
    assert_only(&committee_of_ann(settings, persons), TRAVELLING_DISTANCE, 1);
}

#[test]
fn test_travelling_distance_is_summed_per_person() {
    // Each 60 trip fits the budget on its own; the 120 total does not.
    let bob = || professional("Bob").with_location("Lyon");
    let settings = paris_lyon(60, Range::new(0, 100));
    let solution = committees_of_ann_and_dan(settings, bob(), professional("Cid"), "Tuesday");
    assert_only(&solution, TRAVELLING_DISTANCE, 1);

    let explanation = CommitteeScoreDirector::new(solution).explain();
    let analysis = explanation.get(TRAVELLING_DISTANCE).unwrap();
    assert_eq!(analysis.matches[0].justification.entities[1], "120");

    let settings = paris_lyon(60, Range::new(0, 150));
    let solution = committees_of_ann_and_dan(settings, bob(), professional("Cid"), "Tuesday");
    assert_only(&solution, TRAVELLING_DISTANCE, 0);
}

#[test]
fn test_max_inspections() {
    let persons = vec![
        professional("Ann").needing_evaluation(),
        professional("Bob").with_max_inspections(0),
        professional("Cid").with_max_inspections(1),
    ];
    assert_only(&committee_of_ann(Settings::default(), persons), MAX_INSPECTIONS, 1);
}

#[test]
fn test_max_inspections_counts_every_assigned_slot() {
    let solution = committees_of_ann_and_dan(
        Settings::default(),
        professional("Bob").with_max_inspections(1),
        professional("Cid").with_max_inspections(2),
        "Tuesday",
    );
    assert_only(&solution, MAX_INSPECTIONS, 1);

    let explanation = CommitteeScoreDirector::new(solution).explain();
    let analysis = explanation.get(MAX_INSPECTIONS).unwrap();
    assert_eq!(analysis.matches[0].justification.entities[1], "2");
}

#[test]
fn test_committees_per_time_slot_counts_the_whole_slot() {
    let settings = Settings {
        committee_meeting_size: Range::new(1, 1),
        ..Settings::default()
    };
    let apart = committees_of_ann_and_dan(
        settings.clone(),
        professional("Bob"),
        professional("Cid"),
        "Tuesday",
    );
    assert_only(&apart, COMMITTEES_PER_TIME_SLOT, 0);

    let together =
        committees_of_ann_and_dan(settings, professional("Bob"), professional("Cid"), "Monday");
    assert_only(&together, COMMITTEES_PER_TIME_SLOT, 1);

    let explanation = CommitteeScoreDirector::new(together).explain();
    let analysis = explanation.get(COMMITTEES_PER_TIME_SLOT).unwrap();
    assert_eq!(
        analysis.matches[0].justification.entities,
        vec!["TimeSlot: Monday".to_string(), "2".to_string()]
    );
}

#[test]
fn test_committees_per_time_slot() {
    let settings = Settings {
        committee_meeting_size: Range::new(2, 3),
        ..Settings::default()
    };
    let solution = committee_of_ann(settings, ann_bob_cid());
    assert_only(&solution, COMMITTEES_PER_TIME_SLOT, 1);

    let explanation = CommitteeScoreDirector::new(solution).explain();
    let analysis = explanation.get(COMMITTEES_PER_TIME_SLOT).unwrap();
    assert_eq!(
        analysis.matches[0].justification.entities,
        vec!["TimeSlot: Monday".to_string(), "1".to_string()]
    );
}
