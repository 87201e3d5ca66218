use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Whether the classifier artifact was loaded at startup.
    pub model_loaded: bool,
}

/// Simple health service used by the REST API and the CLI.
///
/// The process stays alive when the classifier artifact is missing, so liveness is always
/// `ok`; `model_loaded` tells monitoring whether predictions are being served.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Check health without creating an instance.
    ///
    /// # Arguments
    /// * `model_loaded` - Whether the classifier is available for predictions.
    ///
    /// # Returns
    /// A `HealthRes` describing the service state.
    pub fn check_health(model_loaded: bool) -> HealthRes {
        let message = if model_loaded {
            "CardioCheck is alive"
        } else {
            "CardioCheck is alive (model not loaded)"
        };
        HealthRes {
            ok: true,
            message: message.into(),
            model_loaded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_missing_model_without_failing_liveness() {
        let res = HealthService::check_health(false);
        assert!(res.ok);
        assert!(!res.model_loaded);
        assert!(res.message.contains("model not loaded"));
    }
}
