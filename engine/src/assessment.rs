//! Per-test evaluation and the assessment orchestrator

use tracing::debug;

use crate::body_comp::{bmi_result, whr_result};
use crate::errors::EngineError;
use crate::models::{AssessmentInput, Gender, MetricResult, TestCategory, TestDefinition};
use crate::norms::NormsProvider;
use crate::rating::{classify, AgeBracket};

/// Every test in the battery.
///
/// Computed entries (BMI, WHR) are derived from client body measurements and
/// never submitted by test_id.
pub static TEST_REGISTRY: [TestDefinition; 8] = [
    TestDefinition {
        test_id: "pushup",
        test_name: "Push-up Test",
        category: TestCategory::Strength,
        unit: "reps",
        description: "Measures upper-body push strength and muscular endurance. \
            Count maximum repetitions with proper form. \
            Males: standard push-up. Females: modified (knee) push-up.",
        computed: false,
    },
    TestDefinition {
        test_id: "wall_sit",
        test_name: "Wall Sit Test",
        category: TestCategory::Strength,
        unit: "seconds",
        description: "Measures lower-body isometric endurance. \
            Hold a seated position against a wall (90-degree knee angle) as long as possible.",
        computed: false,
    },
    TestDefinition {
        test_id: "plank",
        test_name: "Forearm Plank Test",
        category: TestCategory::Strength,
        unit: "seconds",
        description: "Measures core stability and endurance. \
            Hold a forearm plank with straight body alignment until form breaks.",
        computed: false,
    },
    TestDefinition {
        test_id: "sit_and_reach",
        test_name: "Canadian Trunk Forward Flexion",
        category: TestCategory::Flexibility,
        unit: "cm",
        description: "Measures hamstring and lower-back flexibility. \
            Sit with feet flat against box, reach forward slowly. \
            Best of two trials, hold 2 seconds.",
        computed: false,
    },
    TestDefinition {
        test_id: "zipper",
        test_name: "Zipper (Back Scratch) Test",
        category: TestCategory::Flexibility,
        unit: "cm",
        description: "Measures shoulder and upper-arm flexibility. \
            Reach one hand over shoulder and one behind back. \
            Positive = overlap (cm); negative = gap (cm).",
        computed: false,
    },
    TestDefinition {
        test_id: "step_test",
        test_name: "YMCA 3-Minute Step Test",
        category: TestCategory::Cardio,
        unit: "bpm",
        description: "Measures cardiovascular fitness via recovery heart rate. \
            Step on/off a 12-inch bench at 96 bpm (24 steps/min) for 3 minutes. \
            Count pulse for 1 minute immediately after. Lower BPM = better.",
        computed: false,
    },
    TestDefinition {
        test_id: "bmi",
        test_name: "Body Mass Index (BMI)",
        category: TestCategory::BodyComp,
        unit: "kg/m²",
        description: "Computed from client height and weight. \
            WHO classification: Normal 18.5-24.9, Overweight 25-29.9, Obese >= 30.",
        computed: true,
    },
    TestDefinition {
        test_id: "waist_to_hip",
        test_name: "Waist-to-Hip Ratio",
        category: TestCategory::BodyComp,
        unit: "ratio",
        description: "Computed from client waist and hip circumference. \
            WHO risk thresholds: Male >= 0.90, Female >= 0.85 = increased risk.",
        computed: true,
    },
];

/// Metadata for all registered tests.
pub fn test_battery() -> &'static [TestDefinition] {
    &TEST_REGISTRY
}

/// Evaluate a single submitted test against its normative data.
///
/// Resolves the client's age bracket, looks up the gender + bracket threshold
/// row, and classifies the raw value with the table's directionality. Fails
/// when the test is unknown or its tables are missing the required row.
pub fn evaluate_test(
    norms: &impl NormsProvider,
    test_id: &str,
    value: f64,
    age: i32,
    gender: Gender,
) -> Result<MetricResult, EngineError> {
    let table = norms.threshold_table(test_id)?;
    let bracket = AgeBracket::from_age(age);
    let row = table.row(test_id, gender, bracket)?;
    let rating = classify(value, row, table.inverted);

    Ok(MetricResult {
        test_name: table.test_name.clone(),
        raw_value: value,
        unit: table.unit.clone(),
        rating: rating.label().to_string(),
        category: table.category,
        description: format!("{}: {} {} — {}", table.test_name, value, table.unit, rating),
        thresholds: Some(*row),
        inverted: table.inverted,
    })
}

/// Evaluate every submitted test, then auto-append computed body-composition
/// metrics where the profile carries the required measurements.
///
/// Submitted tests are fail-fast: one unknown test_id aborts the whole batch
/// with no partial results, since it signals a client/schema mismatch that
/// should not silently produce a partial report. The computed metrics (BMI,
/// WHR) are best-effort and always come last, in that order.
pub fn evaluate_all(
    norms: &impl NormsProvider,
    input: &AssessmentInput,
) -> Result<Vec<MetricResult>, EngineError> {
    let mut results = Vec::with_capacity(input.tests.len() + 2);

    for (test_id, value) in &input.tests {
        let result = evaluate_test(norms, test_id, *value, input.client.age, input.client.gender)?;
        results.push(result);
    }

    if let Some(bmi) = bmi_result(&input.client) {
        results.push(bmi);
    }
    if let Some(whr) = whr_result(&input.client) {
        results.push(whr);
    }

    debug!(
        client = %input.client.name,
        submitted = input.tests.len(),
        total = results.len(),
        "assessment evaluated"
    );
    Ok(results)
}
