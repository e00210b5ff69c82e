mod common;

use common::{file_part, test_config, TestApp};
use genai_gateway::config::PromptLocale;
use genai_gateway::services::providers::mock::MockModel;
use genai_gateway::services::providers::ContentPart;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::json;

const PDF_BYTES: &[u8] = b"%PDF-1.4 test";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";
const WAV_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVE";

fn base64(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[tokio::test]
async fn image_with_prompt_sends_text_then_inline_data() {
    let app = TestApp::spawn(MockModel::replying("a cat")).await;

    let form = Form::new()
        .text("prompt", "What is in this picture?")
        .part("image", file_part(PNG_BYTES, "cat.png", "image/png"));
    let response = app.post_form("/generate-image", form).await;

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "result": "a cat" }));

    assert_eq!(
        app.model.calls()[0].parts,
        vec![
            ContentPart::text("What is in this picture?"),
            ContentPart::inline_data("image/png", base64(PNG_BYTES)),
        ]
    );
}

#[tokio::test]
async fn image_without_prompt_gets_no_default() {
    let app = TestApp::spawn(MockModel::replying("a cat")).await;

    let form = Form::new().part("image", file_part(PNG_BYTES, "cat.png", "image/png"));
    let response = app.post_form("/generate-image", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts,
        vec![ContentPart::inline_data("image/png", base64(PNG_BYTES))]
    );
}

#[tokio::test]
async fn document_without_prompt_gets_summary_default() {
    let app = TestApp::spawn(MockModel::replying("summary")).await;

    let form = Form::new().part(
        "document",
        file_part(PDF_BYTES, "report.pdf", "application/pdf"),
    );
    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts,
        vec![
            ContentPart::text("produce a summary of the following document"),
            ContentPart::inline_data("application/pdf", base64(PDF_BYTES)),
        ]
    );
}

#[tokio::test]
async fn document_with_empty_prompt_gets_summary_default() {
    let app = TestApp::spawn(MockModel::replying("summary")).await;

    let form = Form::new().text("prompt", "").part(
        "document",
        file_part(PDF_BYTES, "report.pdf", "application/pdf"),
    );
    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts[0],
        ContentPart::text("produce a summary of the following document")
    );
}

#[tokio::test]
async fn document_with_prompt_keeps_caller_prompt() {
    let app = TestApp::spawn(MockModel::replying("three items")).await;

    let form = Form::new()
        .part(
            "document",
            file_part(PDF_BYTES, "report.pdf", "application/pdf"),
        )
        .text("prompt", "List the action items");
    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts[0],
        ContentPart::text("List the action items")
    );
}

#[tokio::test]
async fn audio_without_prompt_gets_transcript_default() {
    let app = TestApp::spawn(MockModel::replying("transcript")).await;

    let form = Form::new().part("audio", file_part(WAV_BYTES, "memo.wav", "audio/wav"));
    let response = app.post_form("/generate-from-audio", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts,
        vec![
            ContentPart::text("produce a transcript of the following recording"),
            ContentPart::inline_data("audio/wav", base64(WAV_BYTES)),
        ]
    );
}

#[tokio::test]
async fn indonesian_locale_defaults() {
    let mut config = test_config();
    config.prompts.locale = PromptLocale::Id;
    let app = TestApp::spawn_with_config(config, MockModel::replying("ringkasan")).await;

    let form = Form::new().part(
        "document",
        file_part(PDF_BYTES, "laporan.pdf", "application/pdf"),
    );
    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts[0],
        ContentPart::text("Tolong buat ringkasan dari dokumen berikut")
    );
}

#[tokio::test]
async fn missing_mime_type_falls_back_to_octet_stream() {
    let app = TestApp::spawn(MockModel::replying("ok")).await;

    let form = Form::new().part("image", Part::bytes(PNG_BYTES.to_vec()));
    let response = app.post_form("/generate-image", form).await;

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        app.model.calls()[0].parts,
        vec![ContentPart::inline_data(
            "application/octet-stream",
            base64(PNG_BYTES)
        )]
    );
}

#[tokio::test]
async fn model_failure_returns_500_with_message_only() {
    let app = TestApp::spawn(MockModel::failing(400, "Unsupported MIME type")).await;

    let form = Form::new().part("audio", file_part(WAV_BYTES, "memo.wav", "audio/wav"));
    let response = app.post_form("/generate-from-audio", form).await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Unsupported MIME type" }));
}

#[tokio::test]
async fn missing_file_is_rejected_before_model_call() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    for (path, field) in [
        ("/generate-image", "image"),
        ("/generate-from-document", "document"),
        ("/generate-from-audio", "audio"),
    ] {
        let form = Form::new().text("prompt", "hello");
        let response = app.post_form(path, form).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status(), "{}", path);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(
            body["message"],
            format!("Missing file field '{}'", field),
            "{}",
            path
        );
    }

    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn file_under_another_endpoints_field_is_not_accepted() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let form = Form::new().part(
        "document",
        file_part(PDF_BYTES, "report.pdf", "application/pdf"),
    );
    let response = app.post_form("/generate-image", form).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn second_file_is_rejected() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let form = Form::new()
        .part("image", file_part(PNG_BYTES, "a.png", "image/png"))
        .part("image", file_part(PNG_BYTES, "b.png", "image/png"));
    let response = app.post_form("/generate-image", form).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let form = Form::new().part("audio", file_part(&[], "silence.wav", "audio/wav"));
    let response = app.post_form("/generate-from-audio", form).await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let app = TestApp::spawn(MockModel::replying("unused")).await;

    let response = app
        .post_json("/generate-image", &json!({ "prompt": "hi" }))
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert!(app.model.calls().is_empty());
}

#[tokio::test]
async fn upload_over_limit_is_rejected() {
    let mut config = test_config();
    config.upload.max_upload_bytes = 1024;
    let app = TestApp::spawn_with_config(config, MockModel::replying("unused")).await;

    let form = Form::new().part(
        "document",
        file_part(&vec![b'a'; 8 * 1024], "big.txt", "text/plain"),
    );
    let response = app.post_form("/generate-from-document", form).await;

    assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, response.status());
    assert!(app.model.calls().is_empty());
}
