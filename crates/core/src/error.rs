#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("could not convert {field} value {value:?} to a number")]
    InvalidInput { field: String, value: String },
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{0}")]
    OutOfRange(String),

    #[error("failed to read model artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    ArtifactParse(serde_json::Error),
    #[error("unsupported model artifact format version {0}")]
    UnsupportedArtifactVersion(u32),
    #[error("model artifact feature schema does not match: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("model not loaded: {0}")]
    ModelUnavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read dataset: {0}")]
    DatasetRead(#[from] csv::Error),
    #[error("dataset is missing column {0}")]
    MissingColumn(String),
}

pub type CardioResult<T> = std::result::Result<T, CardioError>;
