use serde::{Deserialize, Serialize};

use crate::session::SessionStats;

/// Request payload for starting an interview
#[derive(Deserialize)]
pub struct StartRequest {
    /// Job role being interviewed for
    pub role: String,
    /// Experience expectation for the role
    pub experience: String,
    /// Interview style ("technical", "behavioral", "problem_solving")
    pub interview_type: String,
    /// Difficulty tier ("easy", "medium", "hard", "legend")
    pub difficulty: String,
}

/// Response payload after starting an interview
#[derive(Serialize)]
pub struct StartResponse {
    /// The first question to put to the candidate
    pub question: String,
    /// Model answer kept aside for review
    pub expected_answer: String,
}

/// Request payload for submitting a candidate answer
#[derive(Deserialize)]
pub struct AnswerRequest {
    /// The candidate's free-text answer
    pub answer: String,
}

/// Response payload after evaluating an answer
#[derive(Serialize)]
pub struct AnswerResponse {
    /// Assessment text for the answer just submitted
    pub assessment: String,
    /// The next question to put to the candidate
    pub follow_up_question: String,
    /// Model answer for the follow-up question
    pub follow_up_expected: String,
    /// Session statistics after this answer
    pub stats: SessionStats,
}
