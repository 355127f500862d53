//! Google Gemini vision gateway implementation
//!
//! SECURITY: API keys are ONLY sent to official Google endpoints.
//! The GEMINI_API_KEY is never sent to any third-party services.

use super::{GatewayError, ImagePayload, RecipeGateway};
use crate::core::AnalysisResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;

/// Official Google Gemini API endpoint
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const ANALYSIS_PROMPT: &str = "\
Analyze this image of a fridge or food ingredients.
1. Identify the visible ingredients.
2. Suggest 5 distinct culinary recipes that use these ingredients. \
Ensure a mix of dietary types (Vegetarian, Keto, etc.) if possible.
3. For each recipe, list all required ingredients. Mark ingredients as \
'isMissing': true if they are NOT seen in the image but are required \
(like spices, oils, or secondary items not visible).
4. Provide step-by-step cooking instructions.

Return the response in JSON format.";

pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_output_tokens: usize,
}

impl GeminiGateway {
    pub fn new() -> Result<Self> {
        let api_key =
            env::var("GEMINI_API_KEY").context("GEMINI_API_KEY environment variable not set")?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: "gemini-2.0-flash-exp".to_string(),
            max_output_tokens: 8192,
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn build_request(&self, image: &ImagePayload) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![
                    GeminiPart::InlineData {
                        inline_data: GeminiInlineData {
                            mime_type: image.mime_type.clone(),
                            data: BASE64.encode(&image.bytes),
                        },
                    },
                    GeminiPart::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                ],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: Some(self.max_output_tokens),
                temperature: Some(1.0),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(analysis_schema()),
            },
        }
    }

    async fn send_request(&self, request: GeminiRequest) -> Result<GeminiResponse, GatewayError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_http_status(status, error_text));
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl RecipeGateway for GeminiGateway {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze_image(
        &self,
        image: &ImagePayload,
    ) -> Result<AnalysisResult, GatewayError> {
        tracing::debug!(model = %self.model, bytes = image.bytes.len(), "Sending image to Gemini");

        let response = self.send_request(self.build_request(image)).await?;

        let candidate = response
            .candidates
            .first()
            .ok_or(GatewayError::EmptyResponse)?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| match p {
                GeminiPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        parse_analysis(&text)
    }
}

/// Parse the model's JSON output into an analysis result.
///
/// With `response_mime_type` set the body should be bare JSON, but models
/// occasionally wrap it in markdown fences; extract the outermost object
/// before giving up.
fn parse_analysis(text: &str) -> Result<AnalysisResult, GatewayError> {
    if let Ok(result) = serde_json::from_str::<AnalysisResult>(text) {
        return Ok(result);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(result) = serde_json::from_str::<AnalysisResult>(&text[start..=end]) {
                return Ok(result);
            }
        }
    }

    Err(GatewayError::MalformedResponse(format!(
        "Response is not a valid analysis payload: {}",
        text.chars().take(200).collect::<String>()
    )))
}

/// Structured-output schema mirroring the analysis payload shape
fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "detectedIngredients": {
                "type": "ARRAY",
                "items": {"type": "STRING"},
                "description": "List of ingredients identified in the image"
            },
            "recipes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "description": {"type": "STRING"},
                        "difficulty": {"type": "STRING", "enum": ["Easy", "Medium", "Hard"]},
                        "prepTime": {"type": "STRING", "description": "e.g. '30 mins'"},
                        "calories": {"type": "INTEGER"},
                        "tags": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"},
                            "description": "Dietary tags like Vegetarian, Vegan, Keto, Gluten-Free"
                        },
                        "ingredients": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": {"type": "STRING"},
                                    "quantity": {"type": "STRING"},
                                    "isMissing": {"type": "BOOLEAN"}
                                },
                                "required": ["name", "quantity", "isMissing"]
                            }
                        },
                        "steps": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"}
                        }
                    },
                    "required": ["name", "description", "difficulty", "prepTime",
                                 "calories", "tags", "ingredients", "steps"]
                }
            }
        },
        "required": ["detectedIngredients", "recipes"]
    })
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        inline_data: GeminiInlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
