//! Model capability abstraction and bindings.
//!
//! Handlers only see [`GenerativeModel`]; the Gemini REST binding is used in
//! production and the scripted mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for model invocations.
///
/// `Display` is the description relayed to HTTP callers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Upstream rejected the call; `message` is the upstream's own wording.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// One unit of model input, in the wire shape of the Gemini REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) payload.
    pub data: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            ContentPart::InlineData { .. } => None,
        }
    }
}

/// A generative model reachable by identifier.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one generation over `parts`, in order, and return the output text.
    async fn generate(&self, model: &str, parts: &[ContentPart]) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_parts_serialize_in_gemini_shape() {
        let parts = vec![
            ContentPart::text("describe this"),
            ContentPart::inline_data("image/png", "aGVsbG8="),
        ];

        assert_eq!(
            serde_json::to_value(&parts).unwrap(),
            json!([
                { "text": "describe this" },
                { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
            ])
        );
    }

    #[test]
    fn api_error_displays_upstream_message() {
        let err = ProviderError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
