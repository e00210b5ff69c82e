//! genai-gateway: HTTP gateway relaying text, image, document and audio
//! prompts to a generative model.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
