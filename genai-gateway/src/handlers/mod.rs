//! HTTP handlers for the genai gateway.

pub mod generate;
pub mod health;
pub mod metrics;

pub use generate::{generate_from_audio, generate_from_document, generate_image, generate_text};
pub use health::health_check;
pub use self::metrics::metrics;
