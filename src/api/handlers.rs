use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use super::types::{AnswerRequest, AnswerResponse, StartRequest, StartResponse};
use super::ServerState;
use crate::error::InterviewError;
use crate::interview::InterviewSettings;
use crate::session::{SessionExport, SessionStats};

/// Validates the Bearer token when the server has an auth key configured
fn authorize(state: &ServerState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(key) = &state.auth_key else {
        return Ok(());
    };

    let auth_header = headers.get("Authorization").ok_or((
        StatusCode::UNAUTHORIZED,
        "Missing authorization".to_string(),
    ))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid authorization header".to_string(),
        )
    })?;

    if !auth_str.starts_with("Bearer ") || &auth_str[7..] != key {
        return Err((StatusCode::UNAUTHORIZED, "Invalid API key".to_string()));
    }
    Ok(())
}

/// Maps pipeline errors onto HTTP status codes
fn error_response(err: InterviewError) -> (StatusCode, String) {
    let status = match &err {
        InterviewError::InvalidInput(_) | InterviewError::InvalidRequest(_) => {
            StatusCode::BAD_REQUEST
        }
        InterviewError::AuthError(_) => StatusCode::UNAUTHORIZED,
        InterviewError::QuotaExceeded(_) | InterviewError::RateLimited { .. } => {
            StatusCode::TOO_MANY_REQUESTS
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

/// Handles requests to start a new interview
///
/// Resets the session, generates the first question and stores the settings
/// for subsequent answers.
pub async fn handle_start(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(req): Json<StartRequest>,
) -> Result<Json<StartResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let settings = InterviewSettings {
        role: req.role,
        experience: req.experience,
        interview_type: req.interview_type.parse().map_err(error_response)?,
        difficulty: req.difficulty.parse().map_err(error_response)?,
    };

    let qa = {
        let mut session = state.session.lock().await;
        session.reset();
        state
            .interviewer
            .start_interview(&mut session, &settings)
            .await
            .map_err(error_response)?
    };

    *state.settings.lock().await = Some(settings);

    Ok(Json(StartResponse {
        question: qa.question,
        expected_answer: qa.expected_answer,
    }))
}

/// Handles a submitted candidate answer
///
/// Runs the full evaluation flow and returns the assessment together with
/// the follow-up question and refreshed statistics.
pub async fn handle_answer(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;

    let settings = state.settings.lock().await.clone().ok_or((
        StatusCode::BAD_REQUEST,
        "Interview not started".to_string(),
    ))?;

    let mut session = state.session.lock().await;
    let evaluation = state
        .interviewer
        .process_answer(&mut session, &settings, &req.answer)
        .await
        .map_err(error_response)?;

    Ok(Json(AnswerResponse {
        assessment: evaluation.assessment,
        follow_up_question: evaluation.follow_up_question,
        follow_up_expected: evaluation.follow_up_expected,
        stats: session.stats().clone(),
    }))
}

/// Returns the current session statistics
pub async fn handle_stats(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Result<Json<SessionStats>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let session = state.session.lock().await;
    Ok(Json(session.stats().clone()))
}

/// Returns a timestamped export of history and statistics
pub async fn handle_export(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Result<Json<SessionExport>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let session = state.session.lock().await;
    Ok(Json(session.export()))
}
