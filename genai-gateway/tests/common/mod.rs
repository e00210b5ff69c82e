#![allow(dead_code)]

use genai_gateway::config::{
    GatewayConfig, GoogleConfig, ModelConfig, PromptConfig, PromptLocale, UploadConfig,
};
use genai_gateway::services::providers::mock::MockModel;
use genai_gateway::services::providers::GenerativeModel;
use genai_gateway::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub const TEST_MODEL: &str = "gemini-2.5-flash";

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig { port: 0 }, // Random port for testing
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 5,
        },
        models: ModelConfig {
            model: TEST_MODEL.to_string(),
        },
        prompts: PromptConfig {
            locale: PromptLocale::En,
        },
        upload: UploadConfig {
            max_upload_bytes: 1024 * 1024,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub model: MockModel,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the gateway in front of `model`.
    pub async fn spawn(model: MockModel) -> Self {
        Self::spawn_with_config(test_config(), model).await
    }

    pub async fn spawn_with_config(config: GatewayConfig, model: MockModel) -> Self {
        let port = spawn_application(config, Arc::new(model.clone())).await;

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Build and spawn the application, returning its port once `/health` answers.
pub async fn spawn_application(config: GatewayConfig, model: Arc<dyn GenerativeModel>) -> u16 {
    let app = Application::build_with_model(config, model)
        .await
        .expect("Failed to build test application");
    let port = app.port();

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    wait_until_ready(port).await;
    port
}

pub async fn wait_until_ready(port: u16) {
    let client = reqwest::Client::new();
    let health_url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        if client.get(&health_url).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}

pub fn file_part(bytes: &[u8], file_name: &str, mime: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime)
        .unwrap()
}
