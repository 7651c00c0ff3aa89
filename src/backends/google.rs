//! Google Gemini API client used to generate and evaluate interview content.
//!
//! This module integrates with Google's Gemini models through their
//! `generateContent` endpoint. It implements the [`TextGenerator`] capability
//! the interview pipeline is built against.
//!
//! # Features
//! - Single-prompt text generation
//! - Configuration options for temperature, tokens, top_p, top_k
//! - Listing the models available to the configured API key
//!
//! # Example
//! ```no_run
//! use interview_assistant::backends::google::Google;
//! use interview_assistant::TextGenerator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Google::new(
//!         "your-api-key",
//!         None,       // Use default model
//!         Some(1024), // Max tokens
//!         Some(0.7),  // Temperature
//!         None,       // Default timeout
//!         Some(0.8),  // Top-p
//!         Some(40),   // Top-k
//!     );
//!
//!     let reply = client.generate("Say hello.").await.unwrap();
//!     println!("{reply}");
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MODEL;
use crate::error::InterviewError;
use crate::TextGenerator;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for interacting with Google's Gemini API.
pub struct Google {
    /// API key for authentication with Google's API
    pub api_key: String,
    /// Model identifier (e.g. "gemini-1.5-flash")
    pub model: String,
    /// Maximum number of tokens to generate in responses
    pub max_tokens: Option<u32>,
    /// Sampling temperature between 0.0 and 1.0
    pub temperature: Option<f32>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
    /// Top-k sampling parameter
    pub top_k: Option<u32>,
    /// HTTP client for making API requests
    client: Client,
}

/// Request body for content generation
#[derive(Serialize)]
struct GoogleGenerateRequest<'a> {
    /// Prompt content (a single user turn for this application)
    contents: Vec<GoogleContent<'a>>,
    /// Optional generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GoogleGenerationConfig>,
}

/// One turn of content
#[derive(Serialize)]
struct GoogleContent<'a> {
    /// Role of the sender ("user" or "model")
    role: &'a str,
    /// Content parts of the turn
    parts: Vec<GoogleContentPart<'a>>,
}

/// Text content within a turn
#[derive(Serialize)]
struct GoogleContentPart<'a> {
    /// The actual text content
    text: &'a str,
}

/// Configuration parameters for text generation
#[derive(Serialize)]
struct GoogleGenerationConfig {
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none", rename = "topP")]
    top_p: Option<f32>,
    /// Top-k sampling parameter
    #[serde(skip_serializing_if = "Option::is_none", rename = "topK")]
    top_k: Option<u32>,
}

/// Response from the generation API
#[derive(Deserialize)]
struct GoogleGenerateResponse {
    /// Generated completion candidates
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

/// Individual completion candidate
#[derive(Deserialize)]
struct GoogleCandidate {
    /// Content of the candidate response
    content: GoogleResponseContent,
}

/// Content block within a response
#[derive(Deserialize)]
struct GoogleResponseContent {
    /// Parts making up the content
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

/// Individual part of response content
#[derive(Deserialize)]
struct GoogleResponsePart {
    /// Text content of this part
    #[serde(default)]
    text: String,
}

/// Response from the model-listing API
#[derive(Deserialize)]
struct GoogleModelsResponse {
    #[serde(default)]
    models: Vec<GoogleModelEntry>,
}

#[derive(Deserialize)]
struct GoogleModelEntry {
    name: String,
}

impl Google {
    /// Creates a new Google Gemini client with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google API key for authentication
    /// * `model` - Model identifier (defaults to "gemini-1.5-flash")
    /// * `max_tokens` - Maximum tokens in response
    /// * `temperature` - Sampling temperature between 0.0 and 1.0
    /// * `timeout_seconds` - Request timeout in seconds
    /// * `top_p` - Top-p sampling parameter
    /// * `top_k` - Top-k sampling parameter
    ///
    /// # Returns
    ///
    /// A new `Google` client instance
    pub fn new(
        api_key: impl Into<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        top_p: Option<f32>,
        top_k: Option<u32>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            temperature,
            timeout_seconds,
            top_p,
            top_k,
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }

    /// Lists the model identifiers available to the configured API key.
    ///
    /// # Returns
    ///
    /// Model names (e.g. "models/gemini-1.5-flash") or an error
    pub async fn list_models(&self) -> Result<Vec<String>, InterviewError> {
        if self.api_key.is_empty() {
            return Err(InterviewError::AuthError(
                "Missing Google API key".to_string(),
            ));
        }

        let url = format!("{API_BASE}/models?key={key}", key = self.api_key);
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InterviewError::ProviderError(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let models: GoogleModelsResponse = resp.json().await?;
        Ok(models.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl TextGenerator for Google {
    /// Sends a generation request to Google's Gemini API.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt for a single user turn
    ///
    /// # Returns
    ///
    /// The model's response text or an error
    async fn generate(&self, prompt: &str) -> Result<String, InterviewError> {
        if self.api_key.is_empty() {
            return Err(InterviewError::AuthError(
                "Missing Google API key".to_string(),
            ));
        }

        // Remove generation_config if empty to avoid validation errors
        let generation_config = if self.max_tokens.is_none()
            && self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
        {
            None
        } else {
            Some(GoogleGenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
                top_k: self.top_k,
            })
        };

        let req_body = GoogleGenerateRequest {
            contents: vec![GoogleContent {
                role: "user",
                parts: vec![GoogleContentPart { text: prompt }],
            }],
            generation_config,
        };

        let url = format!(
            "{API_BASE}/models/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );

        let mut request = self.client.post(&url).json(&req_body);

        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let resp = request.send().await?;

        // Keep the body in the error: Gemini encodes quota and key problems
        // there, and the retry layer classifies on that text.
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InterviewError::ProviderError(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let json_resp: GoogleGenerateResponse = resp.json().await?;
        let first_candidate = json_resp.candidates.into_iter().next().ok_or_else(|| {
            InterviewError::ProviderError("No candidates returned by Gemini".to_string())
        })?;

        let response_text = first_candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if response_text.trim().is_empty() {
            return Err(InterviewError::ProviderError(
                "Empty response from the model".to_string(),
            ));
        }

        log::trace!("gemini reply: {} bytes", response_text.len());
        Ok(response_text)
    }
}
