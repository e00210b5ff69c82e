//! Generation request adapter.
//!
//! Normalizes the four inbound request shapes into a [`GenerationRequest`],
//! turns it into ordered content parts, calls the model once and maps the
//! outcome onto [`GenerationResponse`] or [`AppError::GenerationFailed`].

use crate::config::PromptLocale;
use crate::dtos::GenerationResponse;
use crate::services::providers::{ContentPart, GenerativeModel};
use axum::body::Bytes;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use metrics::{counter, histogram};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

/// Which endpoint an attachment arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Audio,
}

impl AttachmentKind {
    /// Multipart field carrying the file.
    pub fn field_name(self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Document => "document",
            AttachmentKind::Audio => "audio",
        }
    }

    /// Prompt used when the caller sends none. Images never get one.
    pub fn default_prompt(self, locale: PromptLocale) -> Option<&'static str> {
        match (self, locale) {
            (AttachmentKind::Image, _) => None,
            (AttachmentKind::Document, PromptLocale::En) => {
                Some("produce a summary of the following document")
            }
            (AttachmentKind::Document, PromptLocale::Id) => {
                Some("Tolong buat ringkasan dari dokumen berikut")
            }
            (AttachmentKind::Audio, PromptLocale::En) => {
                Some("produce a transcript of the following recording")
            }
            (AttachmentKind::Audio, PromptLocale::Id) => {
                Some("Tolong buatkan transkrip dari rekaman berikut")
            }
        }
    }
}

/// An uploaded file, held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub mime_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub attachment: Option<Attachment>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            attachment: None,
        }
    }

    pub fn with_attachment(prompt: Option<String>, attachment: Attachment) -> Self {
        Self {
            prompt,
            attachment: Some(attachment),
        }
    }

    /// Label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        self.attachment
            .as_ref()
            .map(|a| a.kind.field_name())
            .unwrap_or("text")
    }

    /// The prompt after default substitution.
    ///
    /// Document and audio requests with an absent or empty prompt get the
    /// locale's default; text and image prompts pass through untouched.
    pub fn effective_prompt(&self, locale: PromptLocale) -> Option<String> {
        let default = self
            .attachment
            .as_ref()
            .and_then(|a| a.kind.default_prompt(locale));

        match (&self.prompt, default) {
            (Some(prompt), Some(default)) if prompt.is_empty() => Some(default.to_string()),
            (None, Some(default)) => Some(default.to_string()),
            (prompt, _) => prompt.clone(),
        }
    }

    /// Ordered content parts: the prompt text (if any) then the attachment.
    pub fn into_parts(self, locale: PromptLocale) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(2);

        if let Some(prompt) = self.effective_prompt(locale) {
            parts.push(ContentPart::text(prompt));
        }

        if let Some(attachment) = self.attachment {
            parts.push(ContentPart::inline_data(
                attachment.mime_type,
                BASE64.encode(&attachment.data),
            ));
        }

        parts
    }
}

/// The adapter: one configured model shared read-only by every request.
#[derive(Clone)]
pub struct GenerationService {
    model: Arc<dyn GenerativeModel>,
    model_id: String,
    locale: PromptLocale,
}

impl GenerationService {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        model_id: impl Into<String>,
        locale: PromptLocale,
    ) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            locale,
        }
    }

    /// Invoke the model exactly once for `request`.
    ///
    /// Failures are logged in full here and reduced to their description.
    #[tracing::instrument(
        skip(self, request),
        fields(kind = request.kind(), model = %self.model_id)
    )]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, AppError> {
        let kind = request.kind();
        let parts = request.into_parts(self.locale);

        tracing::info!(
            kind,
            model = %self.model_id,
            part_count = parts.len(),
            "Generation requested"
        );

        let start = Instant::now();
        let outcome = self.model.generate(&self.model_id, &parts).await;
        histogram!("genai_provider_latency_seconds", "kind" => kind)
            .record(start.elapsed().as_secs_f64());

        match outcome {
            Ok(text) => {
                counter!("genai_requests_total", "kind" => kind, "outcome" => "success")
                    .increment(1);
                tracing::info!(kind, output_len = text.len(), "Generation completed");
                Ok(GenerationResponse { result: text })
            }
            Err(e) => {
                counter!("genai_requests_total", "kind" => kind, "outcome" => "error")
                    .increment(1);
                tracing::error!(
                    kind,
                    model = %self.model_id,
                    error = ?e,
                    "Generation failed"
                );
                Err(AppError::GenerationFailed(e.to_string()))
            }
        }
    }
}
