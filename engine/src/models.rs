//! Domain records consumed and produced by the assessment engine
//!
//! Everything here is a plain serde-serializable record: the API layer,
//! persistence layer, and report renderer exchange these with the engine
//! without any special encoding.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::TierThresholds;

/// Client gender as exercised by the normative tables.
///
/// A closed two-value enumeration: every threshold table and clinical formula
/// in the engine is binary-gender-specific by source. Extending this requires
/// regenerating all normative data, not just adding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

/// Test battery category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    Strength,
    Flexibility,
    Cardio,
    BodyComp,
}

impl TestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Strength => "strength",
            TestCategory::Flexibility => "flexibility",
            TestCategory::Cardio => "cardio",
            TestCategory::BodyComp => "body_comp",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static metadata for one test in the battery.
///
/// Defined once at process start in the registry and never mutated, so it
/// only serializes outward.
#[derive(Debug, Clone, Serialize)]
pub struct TestDefinition {
    pub test_id: &'static str,
    pub test_name: &'static str,
    pub category: TestCategory,
    pub unit: &'static str,
    pub description: &'static str,
    /// True only for tests derived from body measurements (BMI, WHR) rather
    /// than submitted directly.
    pub computed: bool,
}

/// Profile of the client being assessed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    /// Age in years. Out-of-bracket ages clamp during bracket resolution.
    pub age: i32,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neck_cm: Option<f64>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Raw test data submitted by the coach for one assessment.
///
/// `tests` maps test_id to raw value, e.g. `{"pushup": 25.0}`. A `BTreeMap`
/// keeps result ordering deterministic (test_id order); auto-computed body
/// composition metrics are always appended after the submitted tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub client: ClientProfile,
    pub tests: BTreeMap<String, f64>,
}

/// Calculated outcome for a single fitness test.
///
/// `rating` carries the tier's display string ("Poor" … "Excellent") so that
/// historical snapshots round-trip even if their labels predate the current
/// tier set. The threshold row actually used is carried along for downstream
/// rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricResult {
    pub test_name: String,
    pub raw_value: f64,
    pub unit: String,
    pub rating: String,
    pub category: TestCategory,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<TierThresholds>,
    #[serde(default)]
    pub inverted: bool,
}

/// One timestamped assessment: the full result list for a single session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub recorded_at: DateTime<Utc>,
    pub results: Vec<MetricResult>,
}

/// Direction of movement between two assessments of the same test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improved,
    Declined,
    Unchanged,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Improved => f.write_str("improved"),
            Direction::Declined => f.write_str("declined"),
            Direction::Unchanged => f.write_str("unchanged"),
        }
    }
}

/// Per-test delta between two assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub test_name: String,
    pub previous_value: f64,
    pub current_value: f64,
    pub previous_rating: String,
    pub current_rating: String,
    pub direction: Direction,
    /// `current - previous`, rounded to 2 decimals.
    pub delta: f64,
    pub unit: String,
}

/// Best-effort body-composition summary computed from profile measurements
/// alone, for callers that log measurements without a full test battery.
///
/// Every field is optional: a missing source measurement simply leaves the
/// derived fields unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyComposition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
}
