//! Server module for exposing the interview flow via REST API
//!
//! Provides a REST API server with endpoints to start an interview, submit
//! answers and export the session. Supports optional bearer authentication
//! and CORS.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::error::InterviewError;
use crate::interview::{InterviewSettings, Interviewer};
use crate::session::Session;
use handlers::{handle_answer, handle_export, handle_start, handle_stats};

pub use types::{AnswerRequest, AnswerResponse, StartRequest, StartResponse};

/// Main server struct that manages the interviewer and authentication
pub struct Server {
    /// Interviewer driving the LLM calls
    interviewer: Interviewer,
    /// Optional authentication key for API requests
    pub auth_key: Option<String>,
}

/// Internal server state shared between request handlers
struct ServerState {
    /// Interviewer driving the LLM calls
    interviewer: Interviewer,
    /// The single session served by this process
    session: Mutex<Session>,
    /// Settings captured when the interview was started
    settings: Mutex<Option<InterviewSettings>>,
    /// Optional authentication key
    auth_key: Option<String>,
}

impl Server {
    /// Creates a new server instance around the given interviewer
    pub fn new(interviewer: Interviewer) -> Self {
        Self {
            interviewer,
            auth_key: None,
        }
    }

    /// Sets the authentication key required for API requests
    ///
    /// # Arguments
    /// * `key` - API key that clients must provide in the Authorization header
    pub fn with_auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = Some(key.into());
        self
    }

    /// Starts the server and listens for requests on the specified address
    ///
    /// # Arguments
    /// * `addr` - Address to bind to (e.g. "127.0.0.1:3000")
    ///
    /// # Returns
    /// * `Ok(())` if the server shuts down cleanly
    /// * `Err(InterviewError)` if it fails to start
    pub async fn run(self, addr: &str) -> Result<(), InterviewError> {
        let state = Arc::new(ServerState {
            interviewer: self.interviewer,
            session: Mutex::new(Session::new()),
            settings: Mutex::new(None),
            auth_key: self.auth_key,
        });

        let app = Router::new()
            .route("/v1/interview/start", post(handle_start))
            .route("/v1/interview/answer", post(handle_answer))
            .route("/v1/interview/stats", get(handle_stats))
            .route("/v1/interview/export", get(handle_export))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| InterviewError::InvalidRequest(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| InterviewError::InvalidRequest(e.to_string()))?;

        Ok(())
    }
}
