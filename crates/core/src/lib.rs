//! # CardioCheck Core
//!
//! Core logic for the CardioCheck heart-risk service.
//!
//! This crate contains pure request-scoped computation and the classifier:
//! - Feature assembly from form/JSON fields into the trained column order
//! - The `Classifier` seam, the boosted-tree artifact and the `ModelHandle` lifecycle
//! - Derived display metrics and risk-factor buckets
//! - Simulated community/timeline data behind the `InsightSource` stub
//! - Offline evaluation against labelled CSV data
//!
//! **No API concerns**: HTTP routing, HTML and OpenAPI live in `api-rest`; wire records live
//! in `api-shared`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod evaluation;
pub mod input;
pub mod insights;
pub mod metrics;
pub mod profile;
pub mod risk;

mod error;

pub use classifier::{Assessment, Classifier, ModelArtifact, ModelHandle, PredictionResult, RiskLabel};
pub use config::CoreConfig;
pub use error::{CardioError, CardioResult};
pub use input::Fields;
pub use insights::{InsightSource, SimulatedInsights};
pub use profile::{FeatureVector, HealthProfile};
