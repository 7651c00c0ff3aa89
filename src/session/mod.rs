//! Session state for one interview: transcript, history, statistics, export.
//!
//! The session is an explicit value handed into every operation. Nothing in
//! the crate keeps ambient interview state; the scoring pipeline stays a
//! pure function of the messages stored here.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::InterviewType;
use crate::error::InterviewError;
use crate::scoring::RoleMetrics;

/// Minimum number of characters (after trimming) in an acceptable answer.
const MIN_ANSWER_CHARS: usize = 10;

/// Minimum interval between evaluated answers.
const MIN_ANSWER_INTERVAL: Duration = Duration::from_secs(1);

/// A generated interview question together with its model answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAndAnswer {
    /// The question shown to the candidate
    pub question: String,
    /// The model answer kept aside for review
    pub expected_answer: String,
}

/// One entry in the interview transcript.
///
/// Assistant entries carry either a question or an assessment; candidate
/// entries carry the free-text answer. The scoring pipeline reads only
/// [`Message::Assessment`] entries and never mutates the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Message {
    /// Candidate's free-text answer
    Answer(String),
    /// Generated question with its expected answer
    Question(QuestionAndAnswer),
    /// Free-text evaluation of the candidate's most recent answer
    Assessment(String),
}

/// One completed question/answer/feedback exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the exchange completed
    pub timestamp: DateTime<Utc>,
    /// Job role being interviewed for
    pub role: String,
    /// Experience expectation for the role
    pub experience: String,
    /// Interview style in effect
    pub interview_type: InterviewType,
    /// The question that was asked
    pub question: String,
    /// The candidate's answer
    pub answer: String,
    /// The assessment text returned by the evaluator
    pub feedback: String,
}

/// Running statistics over the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Number of answers evaluated so far
    pub total_questions: u32,
    /// Metrics recomputed after the most recent answer
    pub role_specific_metrics: RoleMetrics,
}

/// Snapshot of the session produced by [`Session::export`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    /// When the export was taken
    pub timestamp: DateTime<Utc>,
    /// All completed exchanges
    pub history: Vec<HistoryEntry>,
    /// Statistics at export time
    pub stats: SessionStats,
}

/// State of one interview session.
#[derive(Debug)]
pub struct Session {
    messages: Vec<Message>,
    history: Vec<HistoryEntry>,
    stats: SessionStats,
    request_count: u32,
    last_answer_at: Option<Instant>,
    started: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            history: Vec::new(),
            stats: SessionStats::default(),
            request_count: 0,
            last_answer_at: None,
            started: false,
        }
    }

    /// Marks the interview as started.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Whether the interview has started.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Clears the session back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Appends a message to the transcript.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The transcript in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All completed exchanges.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Current session statistics.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Number of answers accepted for evaluation.
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Most recent question in the transcript, or a placeholder when none
    /// has been asked yet.
    pub fn last_question(&self) -> QuestionAndAnswer {
        self.messages
            .iter()
            .rev()
            .find_map(|message| match message {
                Message::Question(qa) => Some(qa.clone()),
                _ => None,
            })
            .unwrap_or_else(|| QuestionAndAnswer {
                question: "Unknown Question".to_string(),
                expected_answer: String::new(),
            })
    }

    /// Validates a candidate answer before any LLM call is made.
    ///
    /// Empty or near-empty input is rejected locally; it never reaches the
    /// evaluation pipeline.
    pub fn validate_answer(&self, answer: &str) -> Result<(), InterviewError> {
        if answer.trim().chars().count() < MIN_ANSWER_CHARS {
            return Err(InterviewError::InvalidInput(format!(
                "Please provide a more detailed answer (at least {MIN_ANSWER_CHARS} characters)."
            )));
        }
        Ok(())
    }

    /// Enforces the minimum interval between evaluated answers.
    ///
    /// On success the rate-limit clock advances; on failure the caller gets
    /// the remaining wait and the clock is left untouched.
    pub fn check_rate_limit(&mut self) -> Result<(), InterviewError> {
        let now = Instant::now();
        if let Some(last) = self.last_answer_at {
            let elapsed = now.duration_since(last);
            if elapsed < MIN_ANSWER_INTERVAL {
                let wait = MIN_ANSWER_INTERVAL - elapsed;
                return Err(InterviewError::RateLimited {
                    wait_ms: wait.as_millis() as u64,
                });
            }
        }
        self.last_answer_at = Some(now);
        self.request_count += 1;
        Ok(())
    }

    /// Records one completed exchange in the history.
    pub fn record_exchange(
        &mut self,
        role: &str,
        experience: &str,
        interview_type: InterviewType,
        question: &str,
        answer: &str,
        feedback: &str,
    ) {
        self.history.push(HistoryEntry {
            timestamp: Utc::now(),
            role: role.to_string(),
            experience: experience.to_string(),
            interview_type,
            question: question.to_string(),
            answer: answer.to_string(),
            feedback: feedback.to_string(),
        });
    }

    /// Replaces the current metrics and bumps the evaluated-answer counter.
    pub fn update_stats(&mut self, metrics: RoleMetrics) {
        self.stats.total_questions += 1;
        self.stats.role_specific_metrics = metrics;
    }

    /// Takes a timestamped snapshot of history and statistics.
    pub fn export(&self) -> SessionExport {
        SessionExport {
            timestamp: Utc::now(),
            history: self.history.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Serializes the export snapshot as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, InterviewError> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }
}
