//! Inference gateway implementations
//!
//! The session consumes the vision/recipe service through the
//! `RecipeGateway` trait: image bytes in, structured analysis out, or a
//! typed failure. Real inference goes through Gemini; the sim gateway
//! returns deterministic recipes for tests and offline demo runs.

mod error;
mod gemini;
pub mod sim;

pub use error::GatewayError;
pub use gemini::GeminiGateway;
pub use sim::SimGateway;

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// An encoded image ready for submission
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(bytes, "image/jpeg")
    }

    /// Read an image file, inferring the mime type from its extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;

        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_from_extension)
            .unwrap_or("image/jpeg");

        Ok(Self::new(bytes, mime_type))
    }
}

fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Trait for vision/recipe inference gateways
#[async_trait]
pub trait RecipeGateway: Send + Sync {
    /// Get the gateway name
    fn name(&self) -> &str;

    /// Analyze a fridge photo: identify visible ingredients and propose
    /// recipes using them. One attempt, no retry.
    async fn analyze_image(
        &self,
        image: &ImagePayload,
    ) -> Result<crate::core::AnalysisResult, GatewayError>;
}

/// Create a gateway based on name
pub fn create_gateway(
    name: &str,
    model: Option<&str>,
    config: &Config,
) -> Result<Box<dyn RecipeGateway>> {
    match name.to_lowercase().as_str() {
        "gemini" | "google" => {
            let mut g = GeminiGateway::new()?
                .with_model(&config.gateway.gemini.model)
                .with_max_output_tokens(config.gateway.gemini.max_output_tokens);
            if let Some(m) = model {
                g = g.with_model(m);
            }
            Ok(Box::new(g))
        }
        "sim" | "test" => Ok(Box::new(SimGateway::new())),
        _ => {
            anyhow::bail!("Unknown gateway: {}. Supported: gemini, sim", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("png"), Some("image/png"));
        assert_eq!(mime_from_extension("webp"), Some("image/webp"));
        assert_eq!(mime_from_extension("bmp"), None);
    }

    #[test]
    fn test_create_gateway_unknown_name() {
        let config = Config::default();
        let err = create_gateway("midjourney", None, &config).err().unwrap();
        assert!(err.to_string().contains("Unknown gateway"));
    }

    #[test]
    fn test_create_sim_gateway() {
        let config = Config::default();
        let gateway = create_gateway("sim", None, &config).unwrap();
        assert_eq!(gateway.name(), "sim");
    }
}
