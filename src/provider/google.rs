// src/provider/google.rs — Google Generative AI (Gemini) analysis and image clients

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::{ImageSynthesizer, OutfitAnalyzer};
use crate::core::prompts::{
    analysis_response_schema, render_flat_lay, ANALYSIS_PROMPT, ANALYSIS_SYSTEM_INSTRUCTION,
    FLAT_LAY_TEMPLATE,
};
use crate::core::types::{GeneratedImage, OutfitAnalysis, SourceImage};
use crate::infra::config::Config;
use crate::infra::errors::ChicLensError;

const PROVIDER_ID: &str = "google";

/// One client for both remote calls; they share the credential and endpoint.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    analysis_model: String,
    image_model: String,
    aspect_ratio: String,
    template: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Client with default models and endpoint.
    pub fn new(api_key: String) -> Self {
        let defaults = Config::default();
        Self {
            api_key,
            base_url: defaults.provider.base_url,
            analysis_model: defaults.models.analysis,
            image_model: defaults.models.image,
            aspect_ratio: defaults.synthesis.aspect_ratio,
            template: FLAT_LAY_TEMPLATE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config, api_key: String) -> Result<Self, ChicLensError> {
        let client = reqwest::Client::builder()
            .timeout(config.provider.timeout())
            .build()
            .map_err(|e| ChicLensError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.provider.base_url.trim_end_matches('/').to_string(),
            analysis_model: config.models.analysis.clone(),
            image_model: config.models.image.clone(),
            aspect_ratio: config.synthesis.aspect_ratio.clone(),
            template: config
                .synthesis
                .template
                .clone()
                .unwrap_or_else(|| FLAT_LAY_TEMPLATE.to_string()),
            client,
        })
    }

    /// Request body for the analysis call: image + prompt, JSON output constrained by schema.
    fn build_analysis_body(&self, image: &SourceImage) -> serde_json::Value {
        serde_json::json!({
            "system_instruction": {
                "parts": [{ "text": ANALYSIS_SYSTEM_INSTRUCTION }],
            },
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": image.mime_type(),
                            "data": image.to_base64(),
                        }
                    },
                    { "text": ANALYSIS_PROMPT },
                ],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": analysis_response_schema(),
            },
        })
    }

    /// The recreation prompt wrapped in the flat-lay template.
    fn enhance_prompt(&self, prompt: &str) -> Result<String, ChicLensError> {
        render_flat_lay(&self.template, prompt)
            .map_err(|e| ChicLensError::SynthesisFailed(format!("Flat-lay template error: {}", e)))
    }

    fn build_synthesis_body(&self, enhanced_prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": enhanced_prompt }],
            }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": self.aspect_ratio },
            },
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<GenerateContentResponse, ChicLensError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| provider_error(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(provider_error(describe_http_error(status, &error_body)));
        }

        response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl OutfitAnalyzer for GeminiClient {
    async fn analyze(&self, image: &SourceImage) -> Result<OutfitAnalysis, ChicLensError> {
        let body = self.build_analysis_body(image);
        let response = self
            .generate_content(&self.analysis_model, &body)
            .await
            .map_err(|e| ChicLensError::analysis_failed(&e))?;

        let text = extract_text(&response)
            .ok_or_else(|| ChicLensError::AnalysisFailed(empty_response_message(&response)))?;

        OutfitAnalysis::from_json(&text).map_err(|e| {
            ChicLensError::AnalysisFailed(format!("Response does not match schema: {}", e))
        })
    }
}

#[async_trait]
impl ImageSynthesizer for GeminiClient {
    async fn synthesize(&self, prompt: &str) -> Result<GeneratedImage, ChicLensError> {
        let enhanced = self.enhance_prompt(prompt)?;
        let body = self.build_synthesis_body(&enhanced);
        let response = self
            .generate_content(&self.image_model, &body)
            .await
            .map_err(|e| ChicLensError::synthesis_failed(&e))?;

        let inline = extract_image(&response)
            .ok_or_else(|| ChicLensError::SynthesisFailed(empty_response_message(&response)))?;

        let data = BASE64_STANDARD
            .decode(inline.data.trim())
            .map_err(|e| ChicLensError::SynthesisFailed(format!("Invalid image payload: {}", e)))?;

        let mime_type = inline.mime_type.as_deref().unwrap_or("image/png");
        Ok(GeneratedImage::new(mime_type, data))
    }
}

// ─── Wire types ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
    #[serde(alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn first_parts(response: &GenerateContentResponse) -> &[ResponsePart] {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default()
}

/// Concatenated answer text of the first candidate, skipping thought parts.
fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let text: String = first_parts(response)
        .iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First part of the first candidate carrying image data.
fn extract_image(response: &GenerateContentResponse) -> Option<&InlineData> {
    first_parts(response)
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|d| !d.data.is_empty())
}

fn empty_response_message(response: &GenerateContentResponse) -> String {
    match response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        Some(reason) => format!("No usable content in response (finishReason: {})", reason),
        None => "No usable content in response".to_string(),
    }
}

fn provider_error(message: String) -> ChicLensError {
    ChicLensError::Provider {
        provider: PROVIDER_ID.into(),
        message,
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Request timed out: {}", error)
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    }
}

fn describe_http_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error:
                ErrorBody {
                    message: Some(message),
                    status: api_status,
                },
        }) => match api_status {
            Some(api_status) => format!("HTTP {} ({}): {}", status, api_status, message),
            None => format!("HTTP {}: {}", status, message),
        },
        _ => format!("HTTP {}: {}", status, body),
    }
}
