use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The raw input echoed back beside a risk bucket.
///
/// Flags and counts are integers; BMI is the only fractional value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RiskValue {
    Int(i64),
    Float(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskFactor {
    pub name: String,
    pub risk: RiskLevel,
    pub value: RiskValue,
}

/// Response body of `POST /api/risk-factors`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskFactorsRes {
    pub risk_factors: Vec<RiskFactor>,
}
