//! Derived-metric records returned by `/api/health-metrics`.
//!
//! Labels serialise to the display strings the front end shows verbatim, so the serde names
//! here are part of the wire contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Training zone bucket, ordered from lowest to highest effort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum HeartZone {
    Resting,
    #[serde(rename = "Fat Burn")]
    FatBurn,
    Aerobic,
    Anaerobic,
    #[serde(rename = "Red Line")]
    RedLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CholesterolClass {
    #[serde(rename = "High Risk")]
    HighRisk,
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FitnessClass {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Heart-rate zone relative to the age-predicted maximum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeartRateZone {
    pub zone: HeartZone,
    /// Share of maximum heart rate, capped at 100.
    pub percentage: f64,
    pub current_hr: f64,
    pub max_hr: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BmiCategory {
    pub category: BmiClass,
    /// Fixed display score for the category.
    pub percentage: u8,
    /// The computed body-mass index.
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CholesterolLevel {
    pub level: CholesterolClass,
    pub percentage: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FitnessLevel {
    pub level: FitnessClass,
    pub percentage: f64,
}

/// Response body of `POST /api/health-metrics`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthMetricsRes {
    pub heart_rate: HeartRateZone,
    pub bmi: BmiCategory,
    pub cholesterol: CholesterolLevel,
    pub fitness: FitnessLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialise_to_display_strings() {
        let cases = [
            (serde_json::to_value(HeartZone::FatBurn), "Fat Burn"),
            (serde_json::to_value(HeartZone::RedLine), "Red Line"),
            (serde_json::to_value(BmiClass::Overweight), "Overweight"),
            (serde_json::to_value(CholesterolClass::HighRisk), "High Risk"),
            (serde_json::to_value(FitnessClass::Excellent), "Excellent"),
        ];
        for (json, expected) in cases {
            assert_eq!(json.expect("serialise label"), expected);
        }
    }
}
