use crate::dtos::{GenerateTextRequest, GenerationResponse};
use crate::services::{Attachment, AttachmentKind, GenerationRequest};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use service_core::error::AppError;

const PROMPT_FIELD: &str = "prompt";
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

pub async fn generate_text(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTextRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(payload) = payload?;

    let response = state
        .generation
        .generate(GenerationRequest::text(payload.prompt))
        .await?;

    Ok(Json(response))
}

pub async fn generate_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    generate_with_attachment(state, multipart?, AttachmentKind::Image).await
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    generate_with_attachment(state, multipart?, AttachmentKind::Document).await
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    generate_with_attachment(state, multipart?, AttachmentKind::Audio).await
}

async fn generate_with_attachment(
    state: AppState,
    multipart: Multipart,
    kind: AttachmentKind,
) -> Result<Json<GenerationResponse>, AppError> {
    let request = read_upload(multipart, kind).await?;
    let response = state.generation.generate(request).await?;

    Ok(Json(response))
}

/// Collect the optional `prompt` field and exactly one file from the field
/// named after `kind`. Other fields are skipped.
async fn read_upload(
    mut multipart: Multipart,
    kind: AttachmentKind,
) -> Result<GenerationRequest, AppError> {
    let file_field = kind.field_name();
    let mut prompt = None;
    let mut attachment = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some(PROMPT_FIELD) => {
                prompt = Some(field.text().await?);
            }
            Some(name) if name == file_field => {
                if attachment.is_some() {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "Only one '{}' file may be uploaded",
                        file_field
                    )));
                }

                let mime_type = field
                    .content_type()
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_string();
                let data = field.bytes().await?;

                if data.is_empty() {
                    return Err(AppError::BadRequest(anyhow::anyhow!(
                        "Uploaded '{}' file is empty",
                        file_field
                    )));
                }

                tracing::debug!(
                    field = file_field,
                    mime_type = %mime_type,
                    size = data.len(),
                    "Attachment received"
                );

                attachment = Some(Attachment {
                    kind,
                    mime_type,
                    data,
                });
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unexpected multipart field");
            }
        }
    }

    let attachment = attachment.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("Missing file field '{}'", file_field))
    })?;

    Ok(GenerationRequest::with_attachment(prompt, attachment))
}
