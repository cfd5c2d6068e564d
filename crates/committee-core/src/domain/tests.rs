use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::error::CommitteeError;
use crate::test_utils::{self, build, non_professional, professional};

fn options(settings: Settings, participants: Vec<Person>) -> SolverOptions {
    SolverOptions {
        settings,
        participants,
    }
}

#[test]
fn test_builder_creates_slots_in_roster_order() {
    let settings = Settings {
        number_of_assignments_for_a_professional: Range::new(1, 2),
        number_of_assignments_for_a_non_professional: Range::new(0, 1),
        ..Settings::default()
    };
    let solution = build(
        settings,
        vec![
            professional("Ann"),
            non_professional("Bob"),
            professional("Cid").needing_evaluation(),
        ],
    );

    let ids: Vec<u64> = solution.committee_assignments().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    let owners: Vec<&str> = solution
        .assignment_views()
        .map(|a| a.assigned_person().name.as_str())
        .collect();
    assert_eq!(owners, vec!["Ann", "Ann", "Bob", "Cid", "Cid"]);
    assert!(solution.committee_assignments().iter().all(|a| a.committee().is_none()));

    assert_eq!(solution.committees().len(), 1);
    assert_eq!(solution.committees()[0].id, "Cid");
    assert_eq!(solution.committee_of_person(2), Some(0));
    assert_eq!(solution.committee_of_person(0), None);
    assert_eq!(solution.assignments_of_person(1), &[2]);
}

#[test]
fn test_builder_propagates_settings_into_persons() {
    let settings = Settings {
        number_of_assignments_for_an_external: Range::new(1, 1),
        travelling_distance_range: Range::new(0, 40),
        ..Settings::default()
    };
    let solution = build(
        settings,
        vec![
            Person::new("Ext", PersonType::External),
            Person::new("Who", PersonType::Undefined),
        ],
    );
    let ext = solution.person_by_name("ext").unwrap();
    assert_eq!(ext.number_of_assignments_range, Range::new(1, 1));
    assert_eq!(ext.travelling_distance_range, Range::new(0, 40));
    assert_eq!(
        solution.person_by_name("Who").unwrap().number_of_assignments_range,
        DEFAULT_ASSIGNMENTS_RANGE
    );
    assert_eq!(solution.committee_assignments().len(), 6);
}

#[test]
fn test_builder_collects_distinct_named_slots() {
    let solution = build(
        Settings::default(),
        vec![
            Person::new("Ann", PersonType::Professional).with_availability(["Mon", "Tue"]),
            Person::new("Bob", PersonType::Professional)
                .with_availability(["tue", "", "Wed", "MON", " "]),
        ],
    );
    let names: Vec<&str> = solution.time_slots().iter().map(TimeSlot::name).collect();
    assert_eq!(names, vec!["Mon", "Tue", "Wed", " "]);
    assert_eq!(solution.time_slot_index("wed"), Some(2));
}

#[test]
fn test_builder_rejects_duplicate_names() {
    let result = CommitteeSolution::new(
        "dup",
        options(
            Settings::default(),
            vec![professional("Ann"), non_professional("ANN")],
        ),
    );
    match result {
        Err(CommitteeError::DuplicatePersonName(name)) => assert_eq!(name, "ANN"),
        other => panic!("expected duplicate name error, got {other:?}"),
    }
}

#[test]
fn test_builder_rejects_inverted_and_negative_ranges() {
    let settings = Settings {
        nb_pro_participants: Range::new(3, 1),
        ..Settings::default()
    };
    let result = CommitteeSolution::new("inverted", options(settings, vec![professional("Ann")]));
    match result {
        Err(CommitteeError::InvalidRange { field, min, max }) => {
            assert_eq!((field, min, max), ("nbProParticipants", 3, 1));
        }
        other => panic!("expected invalid range error, got {other:?}"),
    }

    let json = r#"{
        "settings": { "travellingDistanceRange": { "value": [-5, 10] } },
        "participants": [{ "name": "Ann", "personType": { "name": "professional" } }]
    }"#;
    let result = CommitteeSolution::new("negative", SolverOptions::from_json(json).unwrap());
    assert!(matches!(
        result,
        Err(CommitteeError::InvalidRange { field: "travellingDistanceRange", .. })
    ));
}

#[test]
fn test_builder_caps_assignment_slots() {
    let json = r#"{
        "settings": { "numberOfAssignmentsForAProfessional": { "value": [0, 1000000000000] } },
        "participants": [
            { "name": "Ann", "personType": { "name": "professional" }, "needsEvaluation": true },
            { "name": "Bob", "personType": { "name": "professional" } }
        ]
    }"#;
    let result = CommitteeSolution::new("huge", SolverOptions::from_json(json).unwrap());
    match result {
        Err(CommitteeError::TooManyAssignments {
            person,
            requested,
            limit,
        }) => {
            assert_eq!(person, "Ann");
            assert_eq!(requested, 1_000_000_000_000);
            assert_eq!(limit, DEFAULT_ASSIGNMENTS_RANGE.max() as usize);
        }
        other => panic!("expected too many assignments error, got {other:?}"),
    }

    // One slot per committee is always allowed, even above the default allowance.
    let settings = Settings {
        number_of_assignments_for_a_professional: Range::new(0, 6),
        ..Settings::default()
    };
    let mut persons: Vec<Person> = (0..6)
        .map(|i| professional(&format!("P{i}")).needing_evaluation())
        .collect();
    persons.push(professional("Eve"));
    let solution = build(settings, persons);
    assert_eq!(solution.committee_assignments().len(), 7 * 6);
}

#[test]
fn test_builder_shuffle_is_seeded() {
    let settings = Settings {
        shuffle_participants: Some(true),
        ..test_utils::roster_settings()
    };
    let participants = test_utils::roster_participants();

    let build_ids = |seed: u64| -> Vec<u64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        CommitteeSolution::build_with_rng(
            "shuffled",
            options(settings.clone(), participants.clone()),
            &mut rng,
        )
        .unwrap()
        .committee_assignments()
        .iter()
        .map(|a| a.id)
        .collect()
    };

    let first = build_ids(7);
    assert_eq!(first, build_ids(7));

    let mut sorted = first.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..first.len() as u64).collect::<Vec<_>>());
    assert_ne!(first, sorted);
}

#[test]
fn test_set_committee_keeps_inverse_in_step() {
    let mut solution = test_utils::staffing_solution(Range::new(0, 0));
    let committee = solution.committee_by_evaluated_person_name("P1").unwrap().index();
    assert_eq!(solution.assignments_of(committee).len(), 2);

    let moved = solution.assignments_of(committee)[0];
    assert_eq!(solution.set_committee(moved, None), Some(committee));
    assert_eq!(solution.assignments_of(committee).len(), 1);
    assert_eq!(solution.set_committee(moved, Some(committee)), None);
    assert_eq!(solution.assignments_of(committee).len(), 2);
    assert_eq!(solution.assigned_count(), 2);
}

#[test]
fn test_set_time_slot_keeps_inverse_in_step() {
    let mut solution = test_utils::staffing_solution(Range::new(0, 0));
    assert_eq!(solution.committee(0).time_slot(), None);

    solution.schedule_by_name("P1", "tuesday").unwrap();
    assert_eq!(solution.committee(0).time_slot().unwrap().name(), "Tuesday");
    assert_eq!(solution.committees_in(1), &[0]);

    assert_eq!(solution.set_time_slot(0, Some(2)), Some(1));
    assert!(solution.committees_in(1).is_empty());
    assert_eq!(solution.committees_in(2), &[0]);
}

#[test]
fn test_unknown_names_are_reported() {
    let mut solution = test_utils::staffing_solution(Range::new(0, 0));
    assert!(matches!(
        solution.assign_by_name("Nobody", "P1"),
        Err(CommitteeError::UnknownEntity { kind: "person", .. })
    ));
    assert!(matches!(
        solution.assign_by_name("P2", "P3"),
        Err(CommitteeError::UnknownEntity { kind: "committee", .. })
    ));
    assert!(matches!(
        solution.schedule_by_name("P1", "Sunday"),
        Err(CommitteeError::UnknownEntity { kind: "time slot", .. })
    ));
}

#[test]
fn test_staffing_scenario() {
    let solution = test_utils::staffing_solution(Range::new(0, 0));
    let committee = solution.committee_by_evaluated_person_name("P1").unwrap();
    assert!(committee.has_correct_number_of_max_professional_persons());
    assert!(committee.has_correct_number_of_min_professional_persons());
    assert!(committee.has_correct_number_of_min_non_professional_persons());
    assert!(committee.has_correct_number_of_max_non_professional_persons());

    let solution = test_utils::staffing_solution(Range::new(1, 1));
    let committee = solution.committee_by_evaluated_person_name("P1").unwrap();
    assert!(!committee.has_correct_number_of_min_non_professional_persons());
    assert!(committee.has_correct_number_of_max_non_professional_persons());
}

#[test]
fn test_duplicated_evaluator() {
    let mut solution = test_utils::staffing_solution(Range::new(0, 0));
    assert!(!solution.committee(0).duplicated_evaluator());

    solution.assign_by_name("P2", "P1").unwrap();
    let committee = solution.committee(0);
    assert_eq!(committee.assignment_count(), 3);
    assert!(committee.duplicated_evaluator());
}

#[test]
fn test_veto_is_symmetric() {
    let ann = professional("Ann").with_vetoes(["bob"]);
    let bob = professional("Bob");
    let cid = professional("Cid");
    assert!(ann.is_vetoed(&bob));
    assert!(bob.is_vetoed(&ann));
    assert!(!ann.is_vetoed(&cid));
    assert!(!cid.is_vetoed(&bob));
}

#[test]
fn test_inspection_history_rounds() {
    let evaluator = professional("Ann").with_history(vec![vec!["Bob"], vec!["Cid", "Dan"]]);
    let bob = professional("Bob");
    let cid = professional("Cid");

    assert!(evaluator.has_already_inspected_last_time(&bob));
    assert!(!evaluator.has_already_inspected_in_the_past(&bob));
    assert!(evaluator.has_already_inspected_in_the_past(&cid));
    assert!(!evaluator.has_already_inspected_last_time(&cid));

    let single_round = professional("Eve").with_history(vec![vec!["Cid"]]);
    assert!(!single_round.has_already_inspected_in_the_past(&cid));
    assert!(!professional("Fay").has_already_inspected_last_time(&cid));
}

#[test]
fn test_rotation_and_follow_up() {
    let settings = Settings {
        nb_inspectors_following_up: 1,
        ..Settings::default()
    };
    let mut solution = build(
        settings,
        vec![
            professional("Ann").needing_evaluation(),
            professional("Bob").with_history(vec![vec!["Ann"]]),
            professional("Cid").with_history(vec![vec![], vec!["ann"]]),
        ],
    );
    solution.assign_by_name("Bob", "Ann").unwrap();
    let committee = solution.committee(0);
    assert!(!committee.inspection_rotation_broken());
    assert!(!committee.inspection_follow_up_not_respected());

    solution.assign_by_name("Cid", "Ann").unwrap();
    let committee = solution.committee(0);
    assert!(committee.inspection_rotation_broken());
    assert!(!committee.inspection_follow_up_not_respected());

    solution.settings_mut().nb_inspectors_following_up = 2;
    assert!(solution.committee(0).inspection_follow_up_not_respected());
}

#[test]
fn test_availability_checks() {
    let mut solution = build(
        Settings::default(),
        vec![
            professional("Ann").needing_evaluation(),
            professional("Bob"),
            Person::new("Cid", PersonType::Professional).with_availability(["Monday"]),
        ],
    );
    solution.assign_by_name("Bob", "Ann").unwrap();
    solution.assign_by_name("Cid", "Ann").unwrap();

    let committee = solution.committee(0);
    assert!(committee.not_enough_available_evaluators());
    assert!(committee.evaluated_not_available());

    solution.schedule_by_name("Ann", "Tuesday").unwrap();
    let committee = solution.committee(0);
    assert!(committee.not_enough_available_evaluators());
    assert!(!committee.evaluated_not_available());

    solution.schedule_by_name("Ann", "Monday").unwrap();
    assert!(!solution.committee(0).not_enough_available_evaluators());

    solution.set_time_slot(0, None);
    solution.settings_mut().use_availability = Some(false);
    let committee = solution.committee(0);
    assert!(!committee.not_enough_available_evaluators());
    assert!(!committee.evaluated_not_available());
}

#[test]
fn test_required_skills() {
    let mut solution = build(
        Settings::default(),
        vec![
            professional("Ann").with_required_skills(["audit", "law"]).needing_evaluation(),
            professional("Bob").with_skills(["Audit"]),
            professional("Cid").with_skills(["law"]),
        ],
    );
    assert!(solution.committee(0).required_skills_not_satisfied());
    solution.assign_by_name("Bob", "Ann").unwrap();
    assert!(solution.committee(0).required_skills_not_satisfied());
    solution.assign_by_name("Cid", "Ann").unwrap();
    assert!(!solution.committee(0).required_skills_not_satisfied());
}

#[test]
fn test_assignment_distance() {
    let settings = Settings {
        distance_matrix: Some(DistanceMatrix::new(
            vec!["Paris".into(), "Lyon".into()],
            vec![vec![Some(0), Some(465)], vec![Some(465), Some(0)]],
        )),
        ..Settings::default()
    };
    let mut solution = build(
        settings,
        vec![
            professional("Ann").with_location("paris").needing_evaluation(),
            professional("Bob").with_location("Lyon"),
            professional("Cid"),
        ],
    );
    let bob = solution.assignments_of_person(1)[0];
    assert_eq!(solution.assignment(bob).distance(), 0);

    solution.assign_by_name("Bob", "Ann").unwrap();
    let cid = solution.assign_by_name("Cid", "Ann").unwrap();
    assert_eq!(solution.assignment(bob).distance(), 465);
    assert_eq!(solution.assignment(cid).distance(), 0);
    assert!(solution.person_by_name("Bob").unwrap().is_not_travelling_in_range(465));
}

#[test]
fn test_self_conflict_and_veto_on_assignment() {
    let mut solution = build(
        Settings::default(),
        vec![
            professional("Ann").needing_evaluation(),
            professional("Bob").with_vetoes(["Ann"]),
        ],
    );
    let own = solution.assign_by_name("Ann", "Ann").unwrap();
    let vetoed = solution.assign_by_name("Bob", "Ann").unwrap();
    assert!(solution.assignment(own).is_self_conflict());
    assert!(!solution.assignment(own).is_vetoed());
    assert!(solution.assignment(vetoed).is_vetoed());
    assert!(!solution.assignment(vetoed).is_self_conflict());
}

#[test]
fn test_roster_fixture_is_fully_assigned() {
    let solution = test_utils::roster_solution();
    assert_eq!(solution.committees().len(), 37);
    for committee in solution.committee_views() {
        assert_eq!(committee.assignment_count(), 3, "{committee}");
        assert!(committee.time_slot().is_some());
        assert!(!committee.duplicated_evaluator());
    }
}

#[test]
fn test_options_from_wire_json() {
    let json = r#"{
        "settings": {
            "nbProParticipants": { "value": [2, 2] },
            "useAvailability": false,
            "committeeMeetingSize": { "value": [1, 4] }
        },
        "participants": [
            {
                "name": "Ann",
                "personType": { "name": "professional" },
                "skills": [{ "name": "audit" }],
                "location": { "name": "Paris" },
                "availability": [{ "name": "Monday" }],
                "needsEvaluation": true,
                "vetoes": [{ "name": "Bob" }],
                "hasAlreadyInspected": [["Bob"], []],
                "maxNumberOfInspections": 3
            },
            { "name": "Bob", "personType": { "name": "mystery" } }
        ]
    }"#;
    let options = SolverOptions::from_json(json).unwrap();

    assert_eq!(options.settings.nb_pro_participants, Range::new(2, 2));
    assert_eq!(options.settings.committee_meeting_size, Range::new(1, 4));
    assert!(!options.settings.uses_availability());
    assert_eq!(
        options.settings.number_of_assignments_for_a_professional,
        DEFAULT_ASSIGNMENTS_RANGE
    );

    let ann = &options.participants[0];
    assert_eq!(ann.person_type, PersonType::Professional);
    assert!(ann.has_skill(&Skill::new("AUDIT")));
    assert_eq!(ann.location_name(), Some("Paris"));
    assert_eq!(ann.vetoes, vec!["Bob".to_string()]);
    assert_eq!(ann.max_number_of_inspections, Some(3));
    assert!(ann.needs_evaluation);
    assert_eq!(options.participants[1].person_type, PersonType::Undefined);
}

#[test]
fn test_solution_json_shape() {
    let mut solution = test_utils::staffing_solution(Range::new(0, 0));
    solution.schedule_by_name("P1", "Monday").unwrap();
    solution.solver_status = Some(SolverStatus::NotSolving);

    let value = serde_json::to_value(&solution).unwrap();
    assert_eq!(value["id"], "test");
    assert_eq!(value["settings"]["nbProParticipants"]["value"][0], 2);
    assert_eq!(value["solverStatus"], "NOT_SOLVING");
    assert!(value["score"].is_null());

    let assignments = value["committeeAssignments"].as_array().unwrap();
    assert_eq!(assignments.len(), solution.committee_assignments().len());
    let first = &assignments[0];
    assert_eq!(first["id"], 0);
    assert_eq!(first["assignedPerson"]["name"], "P1");
    assert!(first["committee"].is_null());

    let placed = assignments
        .iter()
        .find(|a| a["assignedPerson"]["name"] == "P2")
        .unwrap();
    assert_eq!(placed["committee"]["id"], "P1");
    assert_eq!(placed["committee"]["evaluatedPerson"]["personType"]["name"], "professional");
    assert_eq!(placed["committee"]["timeSlot"]["name"], "Monday");
}

#[test]
fn test_options_from_invalid_json() {
    assert!(matches!(
        SolverOptions::from_json(r#"{"participants": [{}]}"#),
        Err(CommitteeError::Json(_))
    ));
}
