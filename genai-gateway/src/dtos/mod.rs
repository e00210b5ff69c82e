//! Request and response bodies of the generation endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /generate-text`. `prompt` is required but may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
}

/// Successful generation as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub result: String,
}
