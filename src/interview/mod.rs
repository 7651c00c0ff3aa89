//! Interview orchestration: question generation, answer evaluation and the
//! per-answer processing flow.
//!
//! The [`Interviewer`] owns the text generator and translates its free-text
//! replies into structured values using literal marker splitting. Scoring is
//! delegated to [`crate::scoring`]; all state lives in the caller's
//! [`Session`].

use crate::config::{Difficulty, InterviewType};
use crate::error::InterviewError;
use crate::prompts::{self, EXPECTED_ANSWER_MARKER, FOLLOW_UP_MARKER, QUESTION_PREFIX};
use crate::scoring;
use crate::session::{Message, QuestionAndAnswer, Session};
use crate::TextGenerator;

/// Parameters fixed for the duration of one interview.
#[derive(Debug, Clone)]
pub struct InterviewSettings {
    /// Job role being interviewed for
    pub role: String,
    /// Experience expectation for the role
    pub experience: String,
    /// Interview style
    pub interview_type: InterviewType,
    /// Question difficulty tier
    pub difficulty: Difficulty,
}

/// Structured outcome of evaluating one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The assessment body shown to the candidate
    pub assessment: String,
    /// The follow-up question to ask next
    pub follow_up_question: String,
    /// Model answer for the follow-up question
    pub follow_up_expected: String,
}

/// Drives an interview against the configured text generator.
pub struct Interviewer {
    generator: Box<dyn TextGenerator>,
}

impl Interviewer {
    /// Creates an interviewer around an existing generator.
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generates a fresh interview question with its model answer.
    ///
    /// # Arguments
    ///
    /// * `settings` - Role, experience, interview type and difficulty
    ///
    /// # Returns
    ///
    /// The parsed question, or an error from the generation call
    pub async fn generate_question(
        &self,
        settings: &InterviewSettings,
    ) -> Result<QuestionAndAnswer, InterviewError> {
        let prompt = prompts::question_prompt(
            &settings.role,
            &settings.experience,
            settings.interview_type,
            settings.difficulty,
        );
        let reply = self.generator.generate(&prompt).await?;
        Ok(split_question(&reply))
    }

    /// Evaluates a candidate's answer to the given question.
    ///
    /// This only performs the LLM round-trip and marker splitting; scores
    /// are extracted later from the stored assessment text when metrics are
    /// recomputed.
    pub async fn evaluate_answer(
        &self,
        settings: &InterviewSettings,
        question: &str,
        answer: &str,
    ) -> Result<Evaluation, InterviewError> {
        let prompt = prompts::evaluation_prompt(
            &settings.role,
            &settings.experience,
            settings.interview_type,
            settings.difficulty,
            question,
            answer,
        );
        let reply = self.generator.generate(&prompt).await?;
        Ok(split_evaluation(&reply))
    }

    /// Starts a new interview by asking the first question.
    pub async fn start_interview(
        &self,
        session: &mut Session,
        settings: &InterviewSettings,
    ) -> Result<QuestionAndAnswer, InterviewError> {
        let qa = self.generate_question(settings).await?;
        session.add_message(Message::Question(qa.clone()));
        session.start();
        log::debug!(
            "started interview for {} - {}",
            settings.role,
            settings.experience
        );
        Ok(qa)
    }

    /// Processes one candidate answer end to end.
    ///
    /// Validates and rate-limits the input, evaluates it against the most
    /// recent question, appends the assessment and the follow-up question to
    /// the transcript, records the exchange in the history, and recomputes
    /// the session metrics from the full transcript.
    pub async fn process_answer(
        &self,
        session: &mut Session,
        settings: &InterviewSettings,
        answer: &str,
    ) -> Result<Evaluation, InterviewError> {
        session.validate_answer(answer)?;
        session.check_rate_limit()?;

        session.add_message(Message::Answer(answer.to_string()));
        let question = session.last_question();

        let evaluation = self
            .evaluate_answer(settings, &question.question, answer)
            .await?;

        session.add_message(Message::Assessment(evaluation.assessment.clone()));
        session.add_message(Message::Question(QuestionAndAnswer {
            question: evaluation.follow_up_question.clone(),
            expected_answer: evaluation.follow_up_expected.clone(),
        }));
        session.record_exchange(
            &settings.role,
            &settings.experience,
            settings.interview_type,
            &question.question,
            answer,
            &evaluation.assessment,
        );

        let metrics = scoring::aggregate(&settings.role, &settings.experience, session.messages());
        session.update_stats(metrics);

        log::debug!("processed answer #{}", session.stats().total_questions);
        Ok(evaluation)
    }
}

/// Splits a question-generation reply into question and model answer.
///
/// Missing markers degrade to placeholders rather than failing.
pub fn split_question(reply: &str) -> QuestionAndAnswer {
    match reply.split_once(EXPECTED_ANSWER_MARKER) {
        Some((question, expected)) => QuestionAndAnswer {
            question: question.replacen(QUESTION_PREFIX, "", 1).trim().to_string(),
            expected_answer: expected.trim().to_string(),
        },
        None => QuestionAndAnswer {
            question: reply.replacen(QUESTION_PREFIX, "", 1).trim().to_string(),
            expected_answer: "No model answer provided.".to_string(),
        },
    }
}

/// Splits an evaluation reply into assessment, follow-up question and
/// follow-up model answer.
///
/// The reply is split once on the first `Follow-up Question:` marker, and
/// the remainder once on `Expected Answer:`. Missing markers degrade to
/// placeholders rather than failing.
pub fn split_evaluation(reply: &str) -> Evaluation {
    let (assessment, follow_up) = match reply.split_once(FOLLOW_UP_MARKER) {
        Some((assessment, follow_up)) => (assessment, follow_up),
        None => (reply, "No follow-up provided."),
    };
    let (follow_up_question, follow_up_expected) = match follow_up.split_once(EXPECTED_ANSWER_MARKER)
    {
        Some((question, expected)) => (question, expected),
        None => (follow_up, "No model answer for follow-up."),
    };
    Evaluation {
        assessment: assessment.trim().to_string(),
        follow_up_question: follow_up_question.trim().to_string(),
        follow_up_expected: follow_up_expected.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_reply_splits_on_markers() {
        let reply = "Good answer overall.\nClarity: 8.0\n\nFollow-up Question:\nWhat is X?\nExpected Answer:\nY is the answer\n";
        let evaluation = split_evaluation(reply);
        assert_eq!(evaluation.assessment, "Good answer overall.\nClarity: 8.0");
        assert_eq!(evaluation.follow_up_question, "What is X?");
        assert_eq!(evaluation.follow_up_expected, "Y is the answer");
    }

    #[test]
    fn missing_follow_up_marker_degrades_to_placeholders() {
        let evaluation = split_evaluation("Just an assessment, nothing else.");
        assert_eq!(evaluation.assessment, "Just an assessment, nothing else.");
        assert_eq!(evaluation.follow_up_question, "No follow-up provided.");
        assert_eq!(evaluation.follow_up_expected, "No model answer for follow-up.");
    }

    #[test]
    fn missing_expected_answer_marker_keeps_follow_up() {
        let reply = "Assessment here.\nFollow-up Question:\nWhy does Z hold?";
        let evaluation = split_evaluation(reply);
        assert_eq!(evaluation.follow_up_question, "Why does Z hold?");
        assert_eq!(evaluation.follow_up_expected, "No model answer for follow-up.");
    }

    #[test]
    fn splitting_uses_only_the_first_marker() {
        let reply = "Body\nFollow-up Question: A\nFollow-up Question: B\nExpected Answer: C";
        let evaluation = split_evaluation(reply);
        assert_eq!(
            evaluation.follow_up_question,
            "A\nFollow-up Question: B"
        );
        assert_eq!(evaluation.follow_up_expected, "C");
    }

    #[test]
    fn question_reply_splits_and_strips_prefix() {
        let reply = "Question: What does the borrow checker do?\nExpected Answer: It enforces aliasing rules.";
        let qa = split_question(reply);
        assert_eq!(qa.question, "What does the borrow checker do?");
        assert_eq!(qa.expected_answer, "It enforces aliasing rules.");
    }

    #[test]
    fn question_reply_without_expected_answer_gets_placeholder() {
        let qa = split_question("Question: Explain eventual consistency.");
        assert_eq!(qa.question, "Explain eventual consistency.");
        assert_eq!(qa.expected_answer, "No model answer provided.");
    }
}
