//! Interview Assistant is an interview-practice engine backed by Google's Gemini API.
//!
//! # Overview
//! The crate generates interview questions for a chosen role and difficulty,
//! evaluates free-text candidate answers, and keeps a running transcript with
//! aggregate performance metrics. It provides:
//!
//! - Question generation with model answers
//! - Answer evaluation with structured sub-scores parsed from the reply
//! - Weighted role-level metrics recomputed over the whole transcript
//! - Bounded retry with exponential backoff around the Gemini call
//! - An interactive terminal client and an optional REST API
//!
//! # Architecture
//! The crate is organized into modules that handle different stages of an
//! interview session:

// Re-export for convenience
pub use async_trait::async_trait;

use crate::error::InterviewError;

/// Backend implementation for the Google Gemini API
pub mod backends;

/// Builder pattern for configuring and instantiating text generators
pub mod builder;

/// Interview catalog: roles, interview types, difficulty and experience levels
pub mod config;

/// Error types and handling
pub mod error;

/// Interview orchestration: question generation, answer evaluation and flow
pub mod interview;

/// Prompt templates sent to the LLM
pub mod prompts;

/// Retry wrapper with exponential backoff for text generators
pub mod resilient;

/// Sub-score extraction and role-level metric aggregation
pub mod scoring;

/// Session state: transcript, history, statistics and export
pub mod session;

#[cfg(feature = "api")]
pub mod api;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Capability trait for the external LLM collaborator.
///
/// The interview pipeline only ever needs one operation: turn a prompt into
/// generated text. Keeping the seam this narrow lets tests substitute a
/// scripted generator and lets the retry wrapper compose with any backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the given prompt.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt to send to the model
    ///
    /// # Returns
    ///
    /// The generated text or an error
    async fn generate(&self, prompt: &str) -> Result<String, InterviewError>;
}
