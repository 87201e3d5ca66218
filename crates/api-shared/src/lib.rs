//! # API Shared
//!
//! Shared wire definitions for the CardioCheck APIs.
//!
//! Contains:
//! - JSON response records for every API route, with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `cardio-core` (which produces these records) and `api-rest` (which serves them).

pub mod error;
pub mod health;
pub mod insights;
pub mod metrics;
pub mod risk;

pub use error::ErrorRes;
pub use health::{HealthRes, HealthService};
pub use insights::{CommunityStat, CommunityStatsRes, HealthTimelineRes};
pub use metrics::{
    BmiCategory, BmiClass, CholesterolClass, CholesterolLevel, FitnessClass, FitnessLevel,
    HealthMetricsRes, HeartRateZone, HeartZone,
};
pub use risk::{RiskFactor, RiskFactorsRes, RiskLevel, RiskValue};
