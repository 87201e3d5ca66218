//! Derived display metrics.
//!
//! Four independent, pure calculators turning raw inputs into a category label plus a
//! percentage for the dashboard. None of them touches the classifier.

use crate::input::Fields;
use crate::{CardioError, CardioResult};
use api_shared::{
    BmiCategory, BmiClass, CholesterolClass, CholesterolLevel, FitnessClass, FitnessLevel,
    HealthMetricsRes, HeartRateZone, HeartZone,
};

const METERS_PER_INCH: f64 = 0.0254;
const KILOGRAMS_PER_POUND: f64 = 0.453592;

/// Age-predicted maximum heart rate, `220 - age`.
///
/// # Errors
/// Returns `CardioError::OutOfRange` when the result is not positive or the subtraction
/// overflows.
pub fn max_heart_rate(age: i64) -> CardioResult<i64> {
    220i64
        .checked_sub(age)
        .filter(|max_hr| *max_hr > 0)
        .ok_or_else(|| {
            CardioError::OutOfRange(format!("age {age} leaves no positive maximum heart rate"))
        })
}

/// Heart-rate zone from age and current heart rate.
///
/// The zone is bucketed on the raw percentage of `220 - age`; the reported percentage is
/// capped at 100.
///
/// # Errors
/// Returns `CardioError::OutOfRange` when the age leaves no positive maximum heart rate.
pub fn heart_rate_zone(age: i64, current_hr: f64) -> CardioResult<HeartRateZone> {
    let max_hr = max_heart_rate(age)?;
    let percentage = current_hr / max_hr as f64 * 100.0;
    let zone = if percentage < 50.0 {
        HeartZone::Resting
    } else if percentage < 60.0 {
        HeartZone::FatBurn
    } else if percentage < 70.0 {
        HeartZone::Aerobic
    } else if percentage < 85.0 {
        HeartZone::Anaerobic
    } else {
        HeartZone::RedLine
    };

    Ok(HeartRateZone {
        zone,
        percentage: percentage.min(100.0),
        current_hr,
        max_hr,
    })
}

/// Body-mass index from feet, inches and pounds.
pub fn bmi_from_imperial(height_feet: f64, height_inches: f64, weight_pounds: f64) -> CardioResult<f64> {
    let height_m = (height_feet * 12.0 + height_inches) * METERS_PER_INCH;
    if height_m <= 0.0 {
        return Err(CardioError::OutOfRange(
            "height must be greater than zero".into(),
        ));
    }
    let weight_kg = weight_pounds * KILOGRAMS_PER_POUND;
    Ok(weight_kg / (height_m * height_m))
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    let (category, percentage) = if bmi < 18.5 {
        (BmiClass::Underweight, 30)
    } else if bmi < 25.0 {
        (BmiClass::Normal, 85)
    } else if bmi < 30.0 {
        (BmiClass::Overweight, 50)
    } else {
        (BmiClass::Obese, 20)
    };

    BmiCategory {
        category,
        percentage,
        value: bmi,
    }
}

pub fn cholesterol_level(high_cholesterol: bool) -> CholesterolLevel {
    if high_cholesterol {
        CholesterolLevel {
            level: CholesterolClass::HighRisk,
            percentage: 25,
        }
    } else {
        CholesterolLevel {
            level: CholesterolClass::Normal,
            percentage: 80,
        }
    }
}

/// Cardiovascular fitness estimate: activity base plus a bonus for being under 50.
pub fn fitness_level(age: i64, physically_active: bool) -> FitnessLevel {
    let base = if physically_active { 60.0 } else { 30.0 };
    let age_bonus = ((50.0 - age as f64) / 50.0 * 20.0).max(0.0);
    let total = (base + age_bonus).min(95.0);

    let level = if total >= 80.0 {
        FitnessClass::Excellent
    } else if total >= 65.0 {
        FitnessClass::Good
    } else if total >= 50.0 {
        FitnessClass::Fair
    } else {
        FitnessClass::Poor
    };

    FitnessLevel {
        level,
        percentage: total,
    }
}

/// Inputs of `/api/health-metrics` after defaulting.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthMetricsInput {
    pub age: i64,
    pub height_feet: i64,
    pub height_inches: i64,
    pub weight_pounds: i64,
    pub high_cholesterol: bool,
    pub physically_active: bool,
    /// Falls back to the age-predicted maximum when not supplied.
    pub current_hr: Option<f64>,
}

impl Default for HealthMetricsInput {
    fn default() -> Self {
        Self {
            age: 30,
            height_feet: 5,
            height_inches: 8,
            weight_pounds: 150,
            high_cholesterol: false,
            physically_active: true,
            current_hr: None,
        }
    }
}

impl HealthMetricsInput {
    pub fn from_fields(fields: Fields<'_>) -> CardioResult<Self> {
        let d = Self::default();
        Ok(Self {
            age: fields.int_or("age", d.age)?,
            height_feet: fields.int_or("height_feet", d.height_feet)?,
            height_inches: fields.int_or("height_inches", d.height_inches)?,
            weight_pounds: fields.int_or("weight", d.weight_pounds)?,
            high_cholesterol: fields.int_or("highchol", 0)? != 0,
            physically_active: fields.int_or("physactivity", 1)? != 0,
            current_hr: fields.float("current_hr")?,
        })
    }

    pub fn from_json(body: &serde_json::Value) -> CardioResult<Self> {
        Self::from_fields(Fields::from_json(body)?)
    }
}

/// All four metrics for one input.
pub fn health_metrics(input: &HealthMetricsInput) -> CardioResult<HealthMetricsRes> {
    let max_hr = max_heart_rate(input.age)?;
    let heart_rate = heart_rate_zone(input.age, input.current_hr.unwrap_or(max_hr as f64))?;
    let bmi = bmi_from_imperial(
        input.height_feet as f64,
        input.height_inches as f64,
        input.weight_pounds as f64,
    )?;

    Ok(HealthMetricsRes {
        heart_rate,
        bmi: bmi_category(bmi),
        cholesterol: cholesterol_level(input.high_cholesterol),
        fitness: fitness_level(input.age, input.physically_active),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bmi_boundaries_are_exact() {
        let cases = [
            (18.49, BmiClass::Underweight),
            (18.5, BmiClass::Normal),
            (24.99, BmiClass::Normal),
            (25.0, BmiClass::Overweight),
            (29.99, BmiClass::Overweight),
            (30.0, BmiClass::Obese),
        ];
        for (bmi, expected) in cases {
            assert_eq!(bmi_category(bmi).category, expected, "bmi {bmi}");
        }
        assert_eq!(bmi_category(22.0).percentage, 85);
        assert_eq!(bmi_category(40.0).percentage, 20);
    }

    #[test]
    fn heart_rate_lower_bound_is_inclusive() {
        let zone = heart_rate_zone(40, 108.0).unwrap();
        assert_eq!(zone.max_hr, 180);
        assert_eq!(zone.percentage, 60.0);
        assert_eq!(zone.zone, HeartZone::Aerobic);
    }

    #[test]
    fn heart_rate_percentage_is_capped_but_zone_is_not() {
        let zone = heart_rate_zone(20, 250.0).unwrap();
        assert_eq!(zone.zone, HeartZone::RedLine);
        assert_eq!(zone.percentage, 100.0);

        assert_eq!(heart_rate_zone(20, 60.0).unwrap().zone, HeartZone::Resting);
        assert_eq!(heart_rate_zone(20, 110.0).unwrap().zone, HeartZone::FatBurn);
        assert_eq!(heart_rate_zone(20, 150.0).unwrap().zone, HeartZone::Anaerobic);
    }

    #[test]
    fn heart_rate_rejects_impossible_age() {
        assert!(matches!(
            heart_rate_zone(220, 80.0),
            Err(CardioError::OutOfRange(_))
        ));
    }

    #[test]
    fn bmi_from_default_measurements() {
        // 5 ft 8 in, 150 lb.
        let bmi = bmi_from_imperial(5.0, 8.0, 150.0).unwrap();
        assert!((bmi - 22.807).abs() < 1e-3, "bmi {bmi}");
        assert!(bmi_from_imperial(0.0, 0.0, 150.0).is_err());
    }

    #[test]
    fn fitness_for_active_thirty_year_old_is_good() {
        let fitness = fitness_level(30, true);
        assert_eq!(fitness.percentage, 68.0);
        assert_eq!(fitness.level, FitnessClass::Good);
    }

    #[test]
    fn fitness_bonus_is_never_negative_and_total_is_capped() {
        assert_eq!(fitness_level(70, true).percentage, 60.0);
        assert_eq!(fitness_level(70, false).level, FitnessClass::Poor);
        assert_eq!(fitness_level(-100, true).percentage, 95.0);
        assert_eq!(fitness_level(0, true).level, FitnessClass::Excellent);
        assert_eq!(fitness_level(25, false).level, FitnessClass::Poor);
        assert_eq!(fitness_level(0, false).level, FitnessClass::Fair);
    }

    #[test]
    fn cholesterol_flag() {
        assert_eq!(cholesterol_level(true).level, CholesterolClass::HighRisk);
        assert_eq!(cholesterol_level(false).percentage, 80);
    }

    #[test]
    fn metrics_without_current_hr_use_max_hr() {
        let input = HealthMetricsInput::from_json(&json!({"age": 35})).unwrap();
        let res = health_metrics(&input).unwrap();
        assert_eq!(res.heart_rate.max_hr, 185);
        assert_eq!(res.heart_rate.current_hr, 185.0);
        assert_eq!(res.heart_rate.zone, HeartZone::RedLine);
        assert_eq!(res.bmi.category, BmiClass::Normal);
        assert_eq!(res.fitness.level, FitnessClass::Good);
    }

    #[test]
    fn metrics_with_supplied_heart_rate() {
        let body = json!({"age": 40, "current_hr": 108, "highchol": 1, "physactivity": 0});
        let res = health_metrics(&HealthMetricsInput::from_json(&body).unwrap()).unwrap();
        assert_eq!(res.heart_rate.zone, HeartZone::Aerobic);
        assert_eq!(res.cholesterol.level, CholesterolClass::HighRisk);
        assert_eq!(res.fitness.level, FitnessClass::Poor);
    }

    #[test]
    fn metrics_reject_malformed_age() {
        let err = HealthMetricsInput::from_json(&json!({"age": "old"})).expect_err("bad age");
        assert!(matches!(err, CardioError::InvalidInput { .. }));
    }

    #[test]
    fn extreme_ages_are_out_of_range_not_overflow() {
        for age in [i64::MIN, i64::MAX, 220] {
            let input = HealthMetricsInput::from_json(&json!({ "age": age })).unwrap();
            match health_metrics(&input) {
                Err(CardioError::OutOfRange(msg)) => assert!(msg.contains(&age.to_string())),
                other => panic!("expected OutOfRange for {age}, got {other:?}"),
            }
        }
        assert_eq!(fitness_level(i64::MIN, true).percentage, 95.0);
        assert_eq!(fitness_level(i64::MAX, false).level, FitnessClass::Poor);
    }
}
