//! Resilience wrapper providing retry with exponential backoff for text generators.
//!
//! Transient failures are retried with exponential backoff; quota and
//! credential problems are terminal and propagate immediately. After the
//! attempt limit the last error is re-raised unchanged.
//!
//! # Example
//!
//! ```no_run
//! use interview_assistant::builder::GeneratorBuilder;
//! use interview_assistant::TextGenerator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = GeneratorBuilder::new()
//!         .api_key(std::env::var("GOOGLE_API_KEY").unwrap_or_default())
//!         .resilient(true)
//!         .resilient_attempts(3)
//!         .resilient_backoff(1_000, 8_000)
//!         .build()?;
//!
//!     let reply = generator.generate("Say hi succinctly").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::error::InterviewError;
use crate::TextGenerator;

/// Configuration for retry and backoff behavior.
#[derive(Clone, Debug)]
pub struct ResilienceConfig {
    /// Maximum number of attempts including the first one
    pub max_attempts: usize,
    /// Initial backoff delay in milliseconds, doubled on each retry
    pub base_delay_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_delay_ms: u64,
}

impl ResilienceConfig {
    /// Creates a default configuration with sane values.
    pub fn defaults() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 8_000,
        }
    }
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Resilient wrapper that retries transient failures using exponential backoff.
pub struct ResilientGenerator {
    inner: Box<dyn TextGenerator>,
    cfg: ResilienceConfig,
}

impl ResilientGenerator {
    /// Creates a new resilient wrapper around an existing generator.
    pub fn new(inner: Box<dyn TextGenerator>, cfg: ResilienceConfig) -> Self {
        Self { inner, cfg }
    }

    /// Promotes provider failures to their terminal classes.
    ///
    /// Gemini reports quota exhaustion and bad API keys inside the error
    /// body, so classification is a case-insensitive substring match on the
    /// rendered message.
    fn classify(err: InterviewError) -> InterviewError {
        if matches!(
            err,
            InterviewError::QuotaExceeded(_) | InterviewError::AuthError(_)
        ) {
            return err;
        }
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("quota") {
            InterviewError::QuotaExceeded(message)
        } else if lowered.contains("invalid") {
            InterviewError::AuthError(message)
        } else {
            err
        }
    }

    fn is_retryable(err: &InterviewError) -> bool {
        match err {
            InterviewError::HttpError(_) => true,
            InterviewError::ProviderError(_) => true,
            InterviewError::JsonError(_) => true,
            InterviewError::Generic(_) => true,
            InterviewError::QuotaExceeded(_) => false,
            InterviewError::AuthError(_) => false,
            InterviewError::InvalidRequest(_) => false,
            InterviewError::InvalidInput(_) => false,
            InterviewError::RateLimited { .. } => false,
        }
    }

    fn backoff_delay(&self, retry_index: usize) -> Duration {
        let delay = self
            .cfg
            .base_delay_ms
            .saturating_mul(1u64 << retry_index.min(16))
            .min(self.cfg.max_delay_ms);
        Duration::from_millis(delay)
    }
}

#[async_trait]
impl TextGenerator for ResilientGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, InterviewError> {
        let mut attempts_left = self.cfg.max_attempts.max(1);
        let mut idx = 0usize;
        loop {
            match self.inner.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    let e = Self::classify(e);
                    if attempts_left == 1 || !Self::is_retryable(&e) {
                        return Err(e);
                    }
                    log::warn!(
                        "generation attempt failed ({} left), backing off: {e}",
                        attempts_left - 1
                    );
                    sleep(self.backoff_delay(idx)).await;
                    attempts_left -= 1;
                    idx += 1;
                }
            }
        }
    }
}
