//! Per-field risk buckets for `/api/risk-factors`.

use crate::input::Fields;
use crate::CardioResult;
use api_shared::{RiskFactor, RiskLevel, RiskValue};

fn flag_risk(set: bool) -> RiskLevel {
    if set {
        RiskLevel::High
    } else {
        RiskLevel::Low
    }
}

pub fn age_risk(age: i64) -> RiskLevel {
    if age < 45 {
        RiskLevel::Low
    } else if age < 65 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub fn bmi_risk(bmi: f64) -> RiskLevel {
    if bmi < 25.0 {
        RiskLevel::Low
    } else if bmi < 30.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Self-rated general health: 1-2 low, 3 medium, anything else high.
pub fn general_health_risk(rating: i64) -> RiskLevel {
    if rating <= 2 {
        RiskLevel::Low
    } else if rating == 3 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Bucket the eight tracked risk factors, in display order.
///
/// # Errors
/// Returns `CardioError::InvalidInput` for the first field that does not convert.
pub fn risk_factors(fields: Fields<'_>) -> CardioResult<Vec<RiskFactor>> {
    let age = fields.int_or("age", 30)?;
    let high_bp = fields.int_or("highbp", 0)?;
    let high_chol = fields.int_or("highchol", 0)?;
    let active = fields.int_or("physactivity", 1)?;
    let smoker = fields.int_or("smoker", 0)?;
    let diabetes = fields.int_or("diabetes", 0)?;
    let bmi = fields.float_or("bmi", 25.0)?;
    let gen_health = fields.int_or("genhlth", 3)?;

    let factor = |name: &str, risk, value| RiskFactor {
        name: name.to_string(),
        risk,
        value,
    };

    Ok(vec![
        factor("Age", age_risk(age), RiskValue::Int(age)),
        factor("Blood Pressure", flag_risk(high_bp != 0), RiskValue::Int(high_bp)),
        factor("Cholesterol", flag_risk(high_chol != 0), RiskValue::Int(high_chol)),
        factor("Exercise", flag_risk(active == 0), RiskValue::Int(active)),
        factor("Smoking", flag_risk(smoker != 0), RiskValue::Int(smoker)),
        factor("Diabetes", flag_risk(diabetes != 0), RiskValue::Int(diabetes)),
        factor("BMI", bmi_risk(bmi), RiskValue::Float(bmi)),
        factor(
            "General Health",
            general_health_risk(gen_health),
            RiskValue::Int(gen_health),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn age_boundaries() {
        assert_eq!(age_risk(44), RiskLevel::Low);
        assert_eq!(age_risk(45), RiskLevel::Medium);
        assert_eq!(age_risk(64), RiskLevel::Medium);
        assert_eq!(age_risk(65), RiskLevel::High);
    }

    #[test]
    fn bmi_and_general_health_boundaries() {
        assert_eq!(bmi_risk(24.99), RiskLevel::Low);
        assert_eq!(bmi_risk(25.0), RiskLevel::Medium);
        assert_eq!(bmi_risk(30.0), RiskLevel::High);
        assert_eq!(general_health_risk(2), RiskLevel::Low);
        assert_eq!(general_health_risk(3), RiskLevel::Medium);
        assert_eq!(general_health_risk(4), RiskLevel::High);
    }

    #[test]
    fn defaults_produce_eight_ordered_factors() {
        let body = json!({});
        let factors = risk_factors(Fields::from_json(&body).unwrap()).unwrap();
        let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Age",
                "Blood Pressure",
                "Cholesterol",
                "Exercise",
                "Smoking",
                "Diabetes",
                "BMI",
                "General Health"
            ]
        );
        assert!(factors[..6].iter().all(|f| f.risk == RiskLevel::Low));
        assert_eq!(factors[6].value, RiskValue::Float(25.0));
        assert_eq!(factors[6].risk, RiskLevel::Medium);
        assert_eq!(factors[7].risk, RiskLevel::Medium);
    }

    #[test]
    fn inactivity_is_high_risk() {
        let body = json!({"physactivity": 0, "smoker": 1, "age": 70});
        let factors = risk_factors(Fields::from_json(&body).unwrap()).unwrap();
        assert_eq!(factors[0].risk, RiskLevel::High);
        assert_eq!(factors[3].risk, RiskLevel::High);
        assert_eq!(factors[3].value, RiskValue::Int(0));
        assert_eq!(factors[4].risk, RiskLevel::High);
    }
}
