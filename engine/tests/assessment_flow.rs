//! End-to-end flow: evaluate a full battery, then track progress between
//! two assessment snapshots.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use fitness_assessment_engine::{
    compute_progress, evaluate_all, AssessmentInput, AssessmentSnapshot, ClientProfile, Direction,
    EngineError, Gender, NormsStore,
};

fn client(age: i32, gender: Gender) -> ClientProfile {
    ClientProfile {
        name: "Jordan".to_string(),
        age,
        gender,
        height_cm: Some(178.0),
        weight_kg: Some(74.0),
        waist_cm: Some(84.0),
        hip_cm: Some(98.0),
        neck_cm: Some(38.0),
        goals: vec!["general_fitness".to_string()],
        notes: None,
    }
}

fn submissions(tests: &[(&str, f64)]) -> BTreeMap<String, f64> {
    tests.iter().map(|(id, v)| (id.to_string(), *v)).collect()
}

#[test]
fn full_battery_with_computed_metrics() {
    let store = NormsStore::bundled();
    let input = AssessmentInput {
        client: client(35, Gender::Male),
        tests: submissions(&[
            ("pushup", 25.0),
            ("plank", 85.0),
            ("sit_and_reach", 29.0),
            ("step_test", 80.0),
        ]),
    };

    let results = evaluate_all(&store, &input).unwrap();
    // 4 submitted + BMI + WHR appended last.
    assert_eq!(results.len(), 6);

    let by_name: BTreeMap<&str, String> = results
        .iter()
        .map(|r| (r.test_name.as_str(), r.rating.clone()))
        .collect();
    assert_eq!(by_name["Push-up Test"], "Very Good"); // 25 >= 22, < 30
    assert_eq!(by_name["YMCA 3-Minute Step Test"], "Very Good"); // 80 <= 81
    assert_eq!(by_name["Body Mass Index (BMI)"], "Very Good"); // 23.4
    assert_eq!(by_name["Waist-to-Hip Ratio"], "Very Good"); // 0.857

    assert_eq!(results[4].test_name, "Body Mass Index (BMI)");
    assert_eq!(results[5].test_name, "Waist-to-Hip Ratio");
    assert_eq!(results[4].raw_value, 23.4);
    assert_eq!(results[5].raw_value, 0.857);
}

#[test]
fn unknown_test_aborts_the_whole_batch() {
    let store = NormsStore::bundled();
    let input = AssessmentInput {
        client: client(30, Gender::Female),
        tests: submissions(&[("pushup", 20.0), ("vertical_jump", 40.0)]),
    };

    let err = evaluate_all(&store, &input).unwrap_err();
    assert_eq!(err, EngineError::UnknownTest("vertical_jump".to_string()));
}

#[test]
fn progress_between_two_snapshots() {
    let store = NormsStore::bundled();
    let profile = client(35, Gender::Male);

    let first = AssessmentSnapshot {
        recorded_at: Utc::now() - Duration::days(90),
        results: evaluate_all(
            &store,
            &AssessmentInput {
                client: profile.clone(),
                tests: submissions(&[("pushup", 18.0), ("step_test", 88.0)]),
            },
        )
        .unwrap(),
    };

    let second = AssessmentSnapshot {
        recorded_at: Utc::now(),
        results: evaluate_all(
            &store,
            &AssessmentInput {
                client: profile,
                tests: submissions(&[("pushup", 24.0), ("step_test", 87.0), ("plank", 70.0)]),
            },
        )
        .unwrap(),
    };

    let deltas = compute_progress(&second.results, &first.results);
    let by_name: BTreeMap<&str, Direction> = deltas
        .iter()
        .map(|d| (d.test_name.as_str(), d.direction))
        .collect();

    // Push-ups: Good (18) -> Very Good (24), improved.
    assert_eq!(by_name["Push-up Test"], Direction::Improved);
    // Step test: 88 -> 87 bpm, both Fair for male 30-39: unchanged despite
    // the raw value moving.
    assert_eq!(by_name["YMCA 3-Minute Step Test"], Direction::Unchanged);
    // Plank is new this session: no delta. BMI/WHR compare against themselves.
    assert!(!by_name.contains_key("Forearm Plank Test"));
    assert_eq!(deltas.len(), 4);

    let pushup = deltas
        .iter()
        .find(|d| d.test_name == "Push-up Test")
        .unwrap();
    assert_eq!(pushup.delta, 6.0);
    assert_eq!(pushup.previous_rating, "Good");
    assert_eq!(pushup.current_rating, "Very Good");
}

#[test]
fn norms_load_from_directory() {
    let dir = std::env::temp_dir().join(format!("fitness-norms-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("grip_strength.json"),
        r#"{
            "test_name": "Grip Strength Test",
            "category": "strength",
            "unit": "kg",
            "inverted": false,
            "norms": {
                "male": { "20-29": { "excellent": 56, "very_good": 51, "good": 45, "fair": 39, "poor": 38 } },
                "female": { "20-29": { "excellent": 36, "very_good": 31, "good": 25, "fair": 19, "poor": 18 } }
            }
        }"#,
    )
    .unwrap();

    let store = NormsStore::load_dir(&dir).unwrap();
    let results = evaluate_all(
        &store,
        &AssessmentInput {
            client: ClientProfile {
                name: "Sam".to_string(),
                age: 24,
                gender: Gender::Female,
                height_cm: None,
                weight_kg: None,
                waist_cm: None,
                hip_cm: None,
                neck_cm: None,
                goals: vec![],
                notes: None,
            },
            tests: submissions(&[("grip_strength", 33.0)]),
        },
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rating, "Very Good");

    std::fs::remove_dir_all(&dir).unwrap();
}
