//! Classifier invocation.
//!
//! The trained model is an explicitly owned dependency: `ModelHandle` is built once at
//! startup, never mutated afterwards, and shared read-only by every request. Anything that
//! implements `Classifier` can stand in for the artifact, which is how the HTTP tests run
//! without a model file.
//!
//! Failure never takes the process down:
//! - a missing or corrupt artifact yields `ModelHandle::Unavailable` and every assessment
//!   reports the model-not-loaded message;
//! - input conversion and inference errors are reported as `Error in input: ...`.

pub mod artifact;
mod xgboost;

pub use artifact::ModelArtifact;

use crate::constants::{HIGH_RISK_MESSAGE, LOW_RISK_MESSAGE, MODEL_NOT_LOADED_MESSAGE};
use crate::input::Fields;
use crate::profile::{FeatureVector, HealthProfile};
use crate::{CardioError, CardioResult};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Binary model output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    /// Class index as used in training data (0 or 1).
    pub fn class(self) -> u8 {
        match self {
            RiskLabel::Low => 0,
            RiskLabel::High => 1,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RiskLabel::Low => LOW_RISK_MESSAGE,
            RiskLabel::High => HIGH_RISK_MESSAGE,
        }
    }
}

/// A single-row binary classifier.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> CardioResult<RiskLabel>;

    /// Probability of the high-risk class, for classifiers that produce one.
    fn score(&self, _features: &FeatureVector) -> CardioResult<Option<f64>> {
        Ok(None)
    }
}

/// Label plus the string shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionResult {
    pub label: RiskLabel,
    pub message: &'static str,
}

impl From<RiskLabel> for PredictionResult {
    fn from(label: RiskLabel) -> Self {
        Self {
            label,
            message: label.message(),
        }
    }
}

/// Outcome of a form assessment, ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assessment {
    Completed(PredictionResult),
    ModelUnavailable,
    InputError(String),
}

impl Assessment {
    pub fn message(&self) -> String {
        match self {
            Assessment::Completed(result) => result.message.to_string(),
            Assessment::ModelUnavailable => MODEL_NOT_LOADED_MESSAGE.to_string(),
            Assessment::InputError(detail) => format!("Error in input: {detail}"),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Assessment::Completed(_))
    }
}

/// Process-wide classifier state, initialised once and read-only afterwards.
#[derive(Clone)]
pub enum ModelHandle {
    Loaded(Arc<dyn Classifier>),
    Unavailable { reason: String },
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelHandle::Loaded(_) => f.write_str("ModelHandle::Loaded"),
            ModelHandle::Unavailable { reason } => f
                .debug_struct("ModelHandle::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

impl ModelHandle {
    /// Load the artifact at `path`. Never fails: load errors are logged and produce an
    /// unavailable handle so the server can still start and report the problem.
    pub fn load(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                tracing::info!(
                    "Loaded model {} ({} trees) from {}",
                    artifact.name(),
                    artifact.booster.trees.len(),
                    path.display()
                );
                Self::from_classifier(artifact)
            }
            Err(e) => {
                tracing::error!("Error loading model from {}: {}", path.display(), e);
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn from_classifier(classifier: impl Classifier + 'static) -> Self {
        ModelHandle::Loaded(Arc::new(classifier))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        ModelHandle::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    /// Predict for an assembled profile.
    ///
    /// # Errors
    /// Returns `CardioError::ModelUnavailable` if no model was loaded, or the classifier's
    /// error if inference fails.
    pub fn predict(&self, profile: &HealthProfile) -> CardioResult<PredictionResult> {
        match self {
            ModelHandle::Loaded(classifier) => {
                let label = classifier.predict(&profile.feature_vector())?;
                Ok(label.into())
            }
            ModelHandle::Unavailable { reason } => {
                Err(CardioError::ModelUnavailable(reason.clone()))
            }
        }
    }

    /// Run the full form flow: availability check, feature assembly, inference.
    pub fn assess(&self, fields: Fields<'_>) -> Assessment {
        if !self.is_loaded() {
            return Assessment::ModelUnavailable;
        }

        let result = HealthProfile::from_fields(fields).and_then(|profile| self.predict(&profile));
        match result {
            Ok(prediction) => Assessment::Completed(prediction),
            Err(e) => {
                tracing::warn!("Assessment failed: {}", e);
                Assessment::InputError(e.to_string())
            }
        }
    }
}
