use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by JSON routes with a 4xx status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
