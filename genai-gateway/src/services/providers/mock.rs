//! Mock model for testing.

use super::{ContentPart, GenerativeModel, ProviderError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A call observed by [`MockModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Text(String),
    Failure { status: u16, message: String },
}

/// Scripted model: answers every call with the same outcome and keeps a log
/// of what it was asked.
#[derive(Debug, Clone)]
pub struct MockModel {
    outcome: Outcome,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockModel {
    /// Succeed with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Text(text.into()),
            calls: Arc::default(),
        }
    }

    /// Fail with an upstream API error carrying `message`.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure {
                status,
                message: message.into(),
            },
            calls: Arc::default(),
        }
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, model: &str, parts: &[ContentPart]) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                parts: parts.to_vec(),
            });
        }

        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::Failure { status, message } => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
