//! Rating tiers and the threshold classifier
//!
//! Everything in the engine that turns a number into a rating goes through
//! [`classify`]: normative test lookups, BMI, waist-to-hip ratio, and body-fat
//! classification all parameterize the same top-down tier scan with their own
//! thresholds and direction.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Rating Tiers
// ============================================================================

/// One of the five ordinal fitness rating tiers.
///
/// Ordinal order is `Poor < Fair < Good < VeryGood < Excellent`; the derived
/// `Ord` matches, so rating comparisons can use `<`/`>` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl Rating {
    /// All tiers from best to worst, the scan order used by [`classify`].
    pub const BEST_TO_WORST: [Rating; 5] = [
        Rating::Excellent,
        Rating::VeryGood,
        Rating::Good,
        Rating::Fair,
        Rating::Poor,
    ];

    /// Ordinal rank of this tier: `Poor` = 0 up to `Excellent` = 4.
    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    /// Display label, e.g. `"Very Good"`.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::VeryGood => "Very Good",
            Rating::Excellent => "Excellent",
        }
    }

    /// Parse a display label back into a tier.
    ///
    /// Returns `None` for labels outside the fixed five; callers decide
    /// whether that is an error (it is not one in progress comparison).
    pub fn from_label(label: &str) -> Option<Rating> {
        match label {
            "Poor" => Some(Rating::Poor),
            "Fair" => Some(Rating::Fair),
            "Good" => Some(Rating::Good),
            "Very Good" => Some(Rating::VeryGood),
            "Excellent" => Some(Rating::Excellent),
            _ => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Tier Thresholds
// ============================================================================

/// Threshold boundaries for the five rating tiers of one test, gender, and
/// age bracket.
///
/// For standard tests the values descend from `excellent` to `poor`; for
/// inverted tests (lower raw value is better) they ascend. Directionality is
/// a property of the whole test, carried separately as an `inverted` flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl TierThresholds {
    /// Threshold boundary for a given tier.
    pub fn for_tier(&self, tier: Rating) -> f64 {
        match tier {
            Rating::Excellent => self.excellent,
            Rating::VeryGood => self.very_good,
            Rating::Good => self.good,
            Rating::Fair => self.fair,
            Rating::Poor => self.poor,
        }
    }
}

/// Determine the rating tier for a value against a threshold table.
///
/// Tiers are checked top-down (excellent first) and the first tier whose
/// boundary is satisfied wins: `value >= threshold` for standard tests,
/// `value <= threshold` for inverted tests. Boundary values earn the tier.
/// A value that satisfies no tier falls back to `Poor`; the lowest tier is
/// open-ended.
pub fn classify(value: f64, thresholds: &TierThresholds, inverted: bool) -> Rating {
    for tier in Rating::BEST_TO_WORST {
        let threshold = thresholds.for_tier(tier);
        let met = if inverted {
            value <= threshold
        } else {
            value >= threshold
        };
        if met {
            return tier;
        }
    }
    Rating::Poor
}

// ============================================================================
// Age Brackets
// ============================================================================

/// Normative-data age bracket.
///
/// The schema carries five brackets, 20-29 through 60-69. Ages outside that
/// span clamp to the nearest bracket: under-20 clients use `20-29`, 70+
/// clients use `60-69`. Clamping is the documented policy; out-of-range
/// ages are never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "20-29")]
    Age20To29,
    #[serde(rename = "30-39")]
    Age30To39,
    #[serde(rename = "40-49")]
    Age40To49,
    #[serde(rename = "50-59")]
    Age50To59,
    #[serde(rename = "60-69")]
    Age60To69,
}

impl AgeBracket {
    /// Resolve an age in years to its normative bracket.
    pub fn from_age(age: i32) -> AgeBracket {
        if age < 30 {
            AgeBracket::Age20To29
        } else if age < 40 {
            AgeBracket::Age30To39
        } else if age < 50 {
            AgeBracket::Age40To49
        } else if age < 60 {
            AgeBracket::Age50To59
        } else {
            AgeBracket::Age60To69
        }
    }

    /// Bracket key as it appears in the norms tables, e.g. `"30-39"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Age20To29 => "20-29",
            AgeBracket::Age30To39 => "30-39",
            AgeBracket::Age40To49 => "40-49",
            AgeBracket::Age50To59 => "50-59",
            AgeBracket::Age60To69 => "60-69",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // Push-up male 20-29 norms.
    const STANDARD: TierThresholds = TierThresholds {
        excellent: 36.0,
        very_good: 29.0,
        good: 22.0,
        fair: 17.0,
        poor: 16.0,
    };

    // Step-test male 20-29 norms (recovery BPM, lower is better).
    const INVERTED: TierThresholds = TierThresholds {
        excellent: 70.0,
        very_good: 79.0,
        good: 83.0,
        fair: 89.0,
        poor: 200.0,
    };

    #[rstest]
    #[case(50.0, Rating::Excellent)]
    #[case(36.0, Rating::Excellent)] // boundary earns the tier
    #[case(35.0, Rating::VeryGood)]
    #[case(29.0, Rating::VeryGood)]
    #[case(22.0, Rating::Good)]
    #[case(17.0, Rating::Fair)]
    #[case(16.0, Rating::Poor)]
    #[case(5.0, Rating::Poor)] // below every threshold, fallback
    fn classify_standard(#[case] value: f64, #[case] expected: Rating) {
        assert_eq!(classify(value, &STANDARD, false), expected);
    }

    #[rstest]
    #[case(60.0, Rating::Excellent)]
    #[case(70.0, Rating::Excellent)]
    #[case(75.0, Rating::VeryGood)]
    #[case(81.0, Rating::Good)]
    #[case(85.0, Rating::Fair)]
    #[case(100.0, Rating::Poor)]
    #[case(999.0, Rating::Poor)] // above every threshold, fallback
    fn classify_inverted(#[case] value: f64, #[case] expected: Rating) {
        assert_eq!(classify(value, &INVERTED, true), expected);
    }

    #[test]
    fn boundary_value_earns_each_tier() {
        for tier in Rating::BEST_TO_WORST {
            assert_eq!(classify(STANDARD.for_tier(tier), &STANDARD, false), tier);
            assert_eq!(classify(INVERTED.for_tier(tier), &INVERTED, true), tier);
        }
    }

    #[test]
    fn rating_ordinals() {
        assert_eq!(Rating::Poor.ordinal(), 0);
        assert_eq!(Rating::Excellent.ordinal(), 4);
        assert!(Rating::VeryGood > Rating::Good);
    }

    #[test]
    fn rating_labels_round_trip() {
        for tier in Rating::BEST_TO_WORST {
            assert_eq!(Rating::from_label(tier.label()), Some(tier));
        }
        assert_eq!(Rating::from_label("Average"), None);
        assert_eq!(Rating::from_label(""), None);
    }

    #[rstest]
    #[case(18, AgeBracket::Age20To29)] // under 20 clamps up
    #[case(22, AgeBracket::Age20To29)]
    #[case(29, AgeBracket::Age20To29)]
    #[case(30, AgeBracket::Age30To39)]
    #[case(35, AgeBracket::Age30To39)]
    #[case(40, AgeBracket::Age40To49)]
    #[case(50, AgeBracket::Age50To59)]
    #[case(60, AgeBracket::Age60To69)]
    #[case(65, AgeBracket::Age60To69)]
    #[case(75, AgeBracket::Age60To69)] // 70+ clamps down
    #[case(200, AgeBracket::Age60To69)]
    fn bracket_resolution(#[case] age: i32, #[case] expected: AgeBracket) {
        assert_eq!(AgeBracket::from_age(age), expected);
    }

    #[test]
    fn bracket_clamping_matches_edges() {
        assert_eq!(AgeBracket::from_age(17), AgeBracket::from_age(20));
        assert_eq!(AgeBracket::from_age(200), AgeBracket::from_age(60));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: higher value never rates worse on a standard test.
        #[test]
        fn prop_classify_monotonic_standard(v1 in -50.0f64..100.0, v2 in -50.0f64..100.0) {
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            prop_assert!(classify(hi, &STANDARD, false) >= classify(lo, &STANDARD, false));
        }

        /// Property: lower value never rates worse on an inverted test.
        #[test]
        fn prop_classify_monotonic_inverted(v1 in 0.0f64..300.0, v2 in 0.0f64..300.0) {
            let (lo, hi) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            prop_assert!(classify(lo, &INVERTED, true) >= classify(hi, &INVERTED, true));
        }

        /// Property: every age resolves to some bracket (total, no panics).
        #[test]
        fn prop_bracket_total(age in -5i32..250) {
            let _ = AgeBracket::from_age(age);
        }
    }
}
