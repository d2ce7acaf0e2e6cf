//! Body-composition formulas and their rating tables
//!
//! BMI, waist-to-hip ratio, and US Navy body-fat percentage are computed from
//! client measurements and classified with the same tier scan as the
//! normative tests, against fixed WHO/clinical cutoffs baked in here (not
//! loaded from the norms store). All of these are "lower is better", so every
//! table classifies with `inverted = true`.
//!
//! Values are rounded once, before classification, so the stored raw value
//! and the tier it earned always agree (BMI and body-fat % to 1 decimal, WHR
//! to 3).

use crate::models::{BodyComposition, ClientProfile, Gender, MetricResult, TestCategory};
use crate::rating::{classify, Rating, TierThresholds};

/// BMI rating boundaries in kg/m², identical for both genders.
pub const BMI_THRESHOLDS: TierThresholds = TierThresholds {
    excellent: 23.0,
    very_good: 25.0,
    good: 27.5,
    fair: 30.0,
    poor: 50.0,
};

/// Below this BMI the client is underweight, which is also rated `Poor`.
///
/// The one place the single-direction tier scan cannot express the truth:
/// for BMI both ends are bad. Underweight is an explicit branch in
/// [`classify_bmi`], not a generic classifier extension.
pub const BMI_UNDERWEIGHT_CUTOFF: f64 = 18.5;

const WHR_THRESHOLDS_MALE: TierThresholds = TierThresholds {
    excellent: 0.85,
    very_good: 0.90,
    good: 0.95,
    fair: 1.00,
    poor: 1.50,
};

const WHR_THRESHOLDS_FEMALE: TierThresholds = TierThresholds {
    excellent: 0.75,
    very_good: 0.80,
    good: 0.85,
    fair: 0.90,
    poor: 1.50,
};

const BODY_FAT_THRESHOLDS_MALE: TierThresholds = TierThresholds {
    excellent: 13.0,
    very_good: 17.0,
    good: 24.0,
    fair: 30.0,
    poor: 60.0,
};

const BODY_FAT_THRESHOLDS_FEMALE: TierThresholds = TierThresholds {
    excellent: 20.0,
    very_good: 24.0,
    good: 31.0,
    fair: 38.0,
    poor: 60.0,
};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ============================================================================
// BMI
// ============================================================================

/// Body mass index: weight(kg) / height(m)².
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Classify a BMI value on the five-tier scale.
///
/// Underweight (< 18.5) is `Poor` via the explicit branch; above that the
/// inverted tier scan applies, boundary values earning the better tier like
/// everywhere else in the engine.
pub fn classify_bmi(bmi: f64) -> Rating {
    if bmi < BMI_UNDERWEIGHT_CUTOFF {
        return Rating::Poor;
    }
    classify(bmi, &BMI_THRESHOLDS, true)
}

// ============================================================================
// Waist-to-Hip Ratio
// ============================================================================

/// Waist-to-hip ratio: waist_cm / hip_cm.
pub fn compute_whr(waist_cm: f64, hip_cm: f64) -> f64 {
    waist_cm / hip_cm
}

/// WHO risk thresholds for WHR, gender-specific.
pub fn whr_thresholds(gender: Gender) -> &'static TierThresholds {
    match gender {
        Gender::Male => &WHR_THRESHOLDS_MALE,
        Gender::Female => &WHR_THRESHOLDS_FEMALE,
    }
}

/// Classify a waist-to-hip ratio on the five-tier scale.
pub fn classify_whr(whr: f64, gender: Gender) -> Rating {
    classify(whr, whr_thresholds(gender), true)
}

// ============================================================================
// Body Fat (US Navy circumference method)
// ============================================================================

/// Estimate body-fat percentage with the US Navy circumference formula.
///
/// Requires height, waist, and neck; the female formula additionally needs
/// hip circumference. Returns `None` when a required measurement is missing
/// or the input combination would take a logarithm of a non-positive number
/// (possible for extreme real-world measurements): "not computable", never
/// a zero. The returned percentage is rounded to 1 decimal.
pub fn compute_body_fat_pct(
    gender: Gender,
    height_cm: f64,
    waist_cm: f64,
    neck_cm: f64,
    hip_cm: Option<f64>,
) -> Option<f64> {
    if height_cm <= 0.0 {
        return None;
    }

    let pct = match gender {
        Gender::Male => {
            let girth = waist_cm - neck_cm;
            if girth <= 0.0 {
                return None;
            }
            495.0 / (1.0324 - 0.19077 * girth.log10() + 0.15456 * height_cm.log10()) - 450.0
        }
        Gender::Female => {
            let girth = waist_cm + hip_cm? - neck_cm;
            if girth <= 0.0 {
                return None;
            }
            495.0 / (1.29579 - 0.35004 * girth.log10() + 0.22100 * height_cm.log10()) - 450.0
        }
    };

    if !pct.is_finite() || pct <= 0.0 {
        return None;
    }
    Some(round1(pct))
}

/// Classify a body-fat percentage on the five-tier scale.
pub fn classify_body_fat(pct: f64, gender: Gender) -> Rating {
    let thresholds = match gender {
        Gender::Male => &BODY_FAT_THRESHOLDS_MALE,
        Gender::Female => &BODY_FAT_THRESHOLDS_FEMALE,
    };
    classify(pct, thresholds, true)
}

/// Split total weight into fat mass and lean mass, both rounded to 1 decimal.
pub fn mass_split(weight_kg: f64, body_fat_pct: f64) -> (f64, f64) {
    let fat_mass = round1(weight_kg * body_fat_pct / 100.0);
    let lean_mass = round1(weight_kg - fat_mass);
    (fat_mass, lean_mass)
}

// ============================================================================
// MetricResult builders
// ============================================================================

/// BMI as a rated metric, when height and weight are both present and
/// nonzero. Absence of either is not an error; the metric is omitted.
pub fn bmi_result(client: &ClientProfile) -> Option<MetricResult> {
    match (client.height_cm, client.weight_kg) {
        (Some(height), Some(weight)) if height > 0.0 && weight > 0.0 => {
            let bmi = round1(compute_bmi(weight, height));
            let rating = classify_bmi(bmi);
            Some(MetricResult {
                test_name: "Body Mass Index (BMI)".to_string(),
                raw_value: bmi,
                unit: "kg/m²".to_string(),
                rating: rating.label().to_string(),
                category: TestCategory::BodyComp,
                description: format!("BMI: {bmi} kg/m² — {rating}"),
                thresholds: Some(BMI_THRESHOLDS),
                inverted: true,
            })
        }
        _ => None,
    }
}

/// Waist-to-hip ratio as a rated metric, when waist and hip are both present
/// and hip is nonzero.
pub fn whr_result(client: &ClientProfile) -> Option<MetricResult> {
    match (client.waist_cm, client.hip_cm) {
        (Some(waist), Some(hip)) if waist > 0.0 && hip > 0.0 => {
            let whr = round3(compute_whr(waist, hip));
            let rating = classify_whr(whr, client.gender);
            Some(MetricResult {
                test_name: "Waist-to-Hip Ratio".to_string(),
                raw_value: whr,
                unit: "ratio".to_string(),
                rating: rating.label().to_string(),
                category: TestCategory::BodyComp,
                description: format!("Waist-to-Hip Ratio: {whr} — {rating}"),
                thresholds: Some(*whr_thresholds(client.gender)),
                inverted: true,
            })
        }
        _ => None,
    }
}

/// Best-effort body-composition summary from whatever measurements the
/// profile carries. Each derived field is independently optional.
pub fn body_composition(client: &ClientProfile) -> BodyComposition {
    let mut summary = BodyComposition::default();

    if let (Some(height), Some(weight)) = (client.height_cm, client.weight_kg) {
        if height > 0.0 && weight > 0.0 {
            let bmi = round1(compute_bmi(weight, height));
            summary.bmi = Some(bmi);
            summary.bmi_rating = Some(classify_bmi(bmi).label().to_string());
        }
    }

    if let (Some(height), Some(waist), Some(neck)) =
        (client.height_cm, client.waist_cm, client.neck_cm)
    {
        if let Some(pct) = compute_body_fat_pct(client.gender, height, waist, neck, client.hip_cm)
        {
            summary.body_fat_pct = Some(pct);
            summary.body_fat_rating = Some(classify_body_fat(pct, client.gender).label().to_string());

            if let Some(weight) = client.weight_kg {
                let (fat, lean) = mass_split(weight, pct);
                summary.fat_mass_kg = Some(fat);
                summary.lean_mass_kg = Some(lean);
            }
        }
    }

    summary
}
