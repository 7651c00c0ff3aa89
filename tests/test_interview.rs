use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use interview_assistant::async_trait;
use interview_assistant::config::{Difficulty, InterviewType};
use interview_assistant::error::InterviewError;
use interview_assistant::interview::{InterviewSettings, Interviewer};
use interview_assistant::session::{Message, Session};
use interview_assistant::TextGenerator;

const QUESTION_REPLY: &str = "\
Question: How would you design a rate limiter for a public API?
Expected Answer: Token bucket or sliding window, with per-client keys and
clear headers communicating limits.";

const EVALUATION_REPLY: &str = "\
Technical Assessment:
- Knowledge Depth: 8.0 - covers the main algorithms
- Implementation Understanding: 8.0 - knows where state lives
- Best Practices Awareness: 8.0 - mentions client communication

Communication Assessment:
- Clarity: 8.0 - concise
- Structure: 8.0 - ordered reasoning
- Professionalism: 8.0 - measured tone

Experience Level Match:
- Expected Level: Mid Level (3-5 years)
- Demonstrated Level: consistent
- Score: 7.0

Key Strengths:
- Algorithm choice
- Operational awareness

Areas for Improvement:
- Distributed coordination detail

Follow-up Question:
How would you make the limiter consistent across replicas?
Expected Answer:
Centralized counters or approximate local buckets with periodic sync.";

/// Generator that answers question prompts and evaluation prompts with
/// fixed replies, counting every call.
struct ScriptedGemini {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for ScriptedGemini {
    async fn generate(&self, prompt: &str) -> Result<String, InterviewError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("evaluate this response") {
            Ok(EVALUATION_REPLY.to_string())
        } else {
            Ok(QUESTION_REPLY.to_string())
        }
    }
}

fn scripted_interviewer() -> (Interviewer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let interviewer = Interviewer::new(Box::new(ScriptedGemini {
        calls: Arc::clone(&calls),
    }));
    (interviewer, calls)
}

fn settings() -> InterviewSettings {
    InterviewSettings {
        role: "Software Engineer".to_string(),
        experience: "Mid Level (3-5 years)".to_string(),
        interview_type: InterviewType::Technical,
        difficulty: Difficulty::Medium,
    }
}

#[tokio::test]
async fn starting_an_interview_asks_the_first_question() {
    let (interviewer, _calls) = scripted_interviewer();
    let mut session = Session::new();

    let qa = interviewer
        .start_interview(&mut session, &settings())
        .await
        .expect("start should succeed");

    assert!(session.started());
    assert_eq!(
        qa.question,
        "How would you design a rate limiter for a public API?"
    );
    assert!(qa.expected_answer.starts_with("Token bucket"));
    assert!(matches!(session.messages(), [Message::Question(_)]));
}

#[tokio::test]
async fn processing_an_answer_updates_transcript_history_and_stats() {
    let (interviewer, calls) = scripted_interviewer();
    let mut session = Session::new();
    let settings = settings();

    interviewer
        .start_interview(&mut session, &settings)
        .await
        .expect("start should succeed");
    let evaluation = interviewer
        .process_answer(
            &mut session,
            &settings,
            "I would use a token bucket per client, stored in Redis.",
        )
        .await
        .expect("processing should succeed");

    assert!(evaluation.assessment.contains("Knowledge Depth: 8.0"));
    assert_eq!(
        evaluation.follow_up_question,
        "How would you make the limiter consistent across replicas?"
    );
    assert!(evaluation
        .follow_up_expected
        .starts_with("Centralized counters"));

    // Question, Answer, Assessment, follow-up Question
    assert_eq!(session.messages().len(), 4);
    assert!(matches!(session.messages()[1], Message::Answer(_)));
    assert!(matches!(session.messages()[2], Message::Assessment(_)));
    assert!(matches!(session.messages()[3], Message::Question(_)));

    assert_eq!(session.history().len(), 1);
    assert_eq!(
        session.history()[0].question,
        "How would you design a rate limiter for a public API?"
    );

    let stats = session.stats();
    assert_eq!(stats.total_questions, 1);
    let metrics = stats.role_specific_metrics;
    assert_eq!(metrics.domain_knowledge, 8.0);
    assert_eq!(metrics.methodology_understanding, 8.0);
    assert_eq!(metrics.practical_experience, 7.0);
    // 0.5 * 8.0 + 0.3 * 7.0 + 0.2 * 8.0
    assert_eq!(metrics.overall_score, 7.7);

    // one question generation plus one evaluation
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn short_answers_are_rejected_before_any_llm_call() {
    let (interviewer, calls) = scripted_interviewer();
    let mut session = Session::new();
    let settings = settings();

    interviewer
        .start_interview(&mut session, &settings)
        .await
        .expect("start should succeed");
    let calls_after_start = calls.load(Ordering::SeqCst);

    let err = interviewer
        .process_answer(&mut session, &settings, "too short")
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::InvalidInput(_)));
    assert_eq!(calls.load(Ordering::SeqCst), calls_after_start);
    assert_eq!(session.history().len(), 0);
    assert_eq!(session.stats().total_questions, 0);
}

#[tokio::test]
async fn immediate_second_answer_is_rate_limited() {
    let (interviewer, _calls) = scripted_interviewer();
    let mut session = Session::new();
    let settings = settings();

    interviewer
        .start_interview(&mut session, &settings)
        .await
        .expect("start should succeed");
    interviewer
        .process_answer(
            &mut session,
            &settings,
            "I would use a token bucket per client, stored in Redis.",
        )
        .await
        .expect("first answer should succeed");

    let err = interviewer
        .process_answer(
            &mut session,
            &settings,
            "A sliding window log would also work for this case.",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InterviewError::RateLimited { .. }));
}

#[tokio::test]
async fn exported_session_contains_history_and_stats() {
    let (interviewer, _calls) = scripted_interviewer();
    let mut session = Session::new();
    let settings = settings();

    interviewer
        .start_interview(&mut session, &settings)
        .await
        .expect("start should succeed");
    interviewer
        .process_answer(
            &mut session,
            &settings,
            "I would use a token bucket per client, stored in Redis.",
        )
        .await
        .expect("processing should succeed");

    let json = session.export_json().expect("export should serialize");
    let doc: serde_json::Value = serde_json::from_str(&json).expect("export should be JSON");

    assert!(doc["timestamp"].is_string());
    assert_eq!(doc["history"].as_array().unwrap().len(), 1);
    assert_eq!(doc["history"][0]["role"], "Software Engineer");
    assert_eq!(doc["history"][0]["interview_type"], "technical");
    assert_eq!(doc["stats"]["total_questions"], 1);
    assert_eq!(
        doc["stats"]["role_specific_metrics"]["overall_score"]
            .as_f64()
            .unwrap(),
        7.7
    );
}
