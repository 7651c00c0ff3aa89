//! Builder module for configuring and instantiating text generators.
//!
//! This module provides a fluent builder for creating the Gemini-backed
//! generator with various settings, optionally wrapped in the retry layer.

use crate::backends::google::Google;
use crate::error::InterviewError;
use crate::resilient::{ResilienceConfig, ResilientGenerator};
use crate::TextGenerator;

/// Builder for configuring and instantiating the text generator.
///
/// Provides a fluent interface for setting model selection, API key,
/// generation parameters and retry behavior.
#[derive(Default)]
pub struct GeneratorBuilder {
    /// API key for authentication with the provider
    api_key: Option<String>,
    /// Model identifier/name to use
    model: Option<String>,
    /// Maximum tokens to generate in responses
    max_tokens: Option<u32>,
    /// Temperature parameter for controlling response randomness (0.0-1.0)
    temperature: Option<f32>,
    /// Request timeout duration in seconds
    timeout_seconds: Option<u64>,
    /// Top-p (nucleus) sampling parameter
    top_p: Option<f32>,
    /// Top-k sampling parameter
    top_k: Option<u32>,
    /// Whether to wrap the generator in the retry layer
    resilient: bool,
    /// Retry and backoff configuration
    resilience: ResilienceConfig,
}

impl GeneratorBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the top-p (nucleus) sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the top-k sampling parameter.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Enables or disables the retry layer.
    pub fn resilient(mut self, enabled: bool) -> Self {
        self.resilient = enabled;
        self
    }

    /// Sets the maximum number of attempts (including the first).
    pub fn resilient_attempts(mut self, attempts: usize) -> Self {
        self.resilience.max_attempts = attempts;
        self
    }

    /// Sets the backoff window: initial delay and cap, in milliseconds.
    pub fn resilient_backoff(mut self, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.resilience.base_delay_ms = base_delay_ms;
        self.resilience.max_delay_ms = max_delay_ms;
        self
    }

    /// Builds the configured generator.
    ///
    /// # Returns
    ///
    /// A boxed [`TextGenerator`], or an error if required configuration is
    /// missing.
    pub fn build(self) -> Result<Box<dyn TextGenerator>, InterviewError> {
        let api_key = self.api_key.ok_or_else(|| {
            InterviewError::InvalidRequest("No API key provided for Gemini".to_string())
        })?;

        let google = Google::new(
            api_key,
            self.model,
            self.max_tokens,
            self.temperature,
            self.timeout_seconds,
            self.top_p,
            self.top_k,
        );

        if self.resilient {
            Ok(Box::new(ResilientGenerator::new(
                Box::new(google),
                self.resilience,
            )))
        } else {
            Ok(Box::new(google))
        }
    }
}
