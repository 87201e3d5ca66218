//! Constants used throughout the CardioCheck core crate.
//!
//! Collects the model schema, defaults and user-facing messages in one place so the HTTP
//! layer, the CLI and the tests agree on them.

/// Column order the classifier was trained on.
///
/// `Stroke` is part of the trained schema but is not collected from users; it is always 0.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "HighBP",
    "HighChol",
    "CholCheck",
    "BMI",
    "Smoker",
    "Stroke",
    "Diabetes",
    "PhysActivity",
    "Fruits",
    "Veggies",
    "HvyAlcoholConsump",
    "AnyHealthcare",
    "NoDocbcCost",
    "GenHlth",
    "MentHlth",
    "PhysHlth",
    "DiffWalk",
    "Sex",
    "Age",
    "Education",
    "Income",
];

/// Number of columns in a feature vector.
pub const FEATURE_COUNT: usize = 21;

/// Label column in evaluation datasets.
pub const TARGET_COLUMN: &str = "HeartDiseaseorAttack";

/// Default artifact path when `CARDIO_MODEL_PATH` is unset.
pub const DEFAULT_MODEL_PATH: &str = "best_heart_model.json";

/// Default listening port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host when `HOST` is unset.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Only artifact format version this build can read.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Decision threshold used when an artifact does not specify one.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

pub const HIGH_RISK_MESSAGE: &str = "⚠️ High Risk of Heart Disease";
pub const LOW_RISK_MESSAGE: &str = "✅ Low Risk of Heart Disease";
pub const MODEL_NOT_LOADED_MESSAGE: &str = "Error: Model not loaded. Please check model file.";
