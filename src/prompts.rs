//! Prompt templates sent to the Gemini API.
//!
//! The evaluation template pins the exact section labels that
//! [`crate::scoring::extract_scores`] parses back out of the reply, so the
//! two must stay in sync.

use crate::config::{Difficulty, InterviewType};

/// Literal marker separating the assessment body from the follow-up question.
pub const FOLLOW_UP_MARKER: &str = "Follow-up Question:";

/// Literal marker separating a question from its model answer.
pub const EXPECTED_ANSWER_MARKER: &str = "Expected Answer:";

/// Prefix stripped from the generated question text.
pub const QUESTION_PREFIX: &str = "Question:";

/// Builds the prompt that asks the model for a fresh interview question.
pub fn question_prompt(
    role: &str,
    experience: &str,
    interview_type: InterviewType,
    difficulty: Difficulty,
) -> String {
    let type_lower = interview_type.to_string().to_lowercase();
    let focus_points = interview_type.focus_points();
    format!(
        "As an expert interviewer for a {role} position with {experience} experience expectation,
generate a relevant {type_lower} interview question.

Role Context:
- Position: {role}
- Experience Level: {experience}
- Interview Type: {interview_type}
- Difficulty: {difficulty}
- Focus Areas: {focus_points}

Required Question Criteria:
1. Must be highly relevant to the {role} role
2. Appropriate for {experience} experience level
3. Follows {type_lower} interview style
4. Matches {difficulty_lower} difficulty:
   - Easy: Core concepts, fundamentals, daily tasks
   - Medium: Applied knowledge, real scenarios, problem-solving
   - Hard: Complex problems, system design, edge cases
   - Legend: Expert challenges, architecture decisions, innovation

Format your response exactly as:
Question: [Clear, focused question appropriate for role and level]
Expected Answer: [Detailed model answer including:
- Key points that should be covered
- Common pitfalls to avoid
- Best practices to mention
- Experience-appropriate insights]",
        difficulty_lower = difficulty.to_string().to_lowercase(),
    )
}

/// Builds the prompt that asks the model to evaluate a candidate's answer.
///
/// The requested format feeds three consumers downstream: the sub-score
/// extractor (labeled decimal scores), the follow-up splitter (the
/// `Follow-up Question:` / `Expected Answer:` markers) and the candidate
/// (the free-text critique around them).
pub fn evaluation_prompt(
    role: &str,
    experience: &str,
    interview_type: InterviewType,
    difficulty: Difficulty,
    question: &str,
    answer: &str,
) -> String {
    format!(
        "As an expert interviewer for {role} positions with {experience} experience expectation, evaluate this response:

Question Asked: {question}
Candidate's Answer: {answer}
Role: {role}
Experience Level: {experience}
Interview Type: {interview_type}
Difficulty: {difficulty}

Provide a detailed evaluation in this EXACT format (use numbers only, no brackets):

Technical Assessment:
- Knowledge Depth: 7.5 - [brief explanation]
- Implementation Understanding: 6.0 - [brief explanation]
- Best Practices Awareness: 7.0 - [brief explanation]

Communication Assessment:
- Clarity: 8.0 - [brief explanation]
- Structure: 7.5 - [brief explanation]
- Professionalism: 8.5 - [brief explanation]

Experience Level Match:
- Expected Level: {experience}
- Demonstrated Level: [assessment]
- Score: 7.0

Key Strengths:
- [Point 1]
- [Point 2]

Areas for Improvement:
- [Point 1]
- [Point 2]

Follow-up Question:
[Ask a logically connected {difficulty_lower} difficulty question]

Expected Answer:
[Provide a model answer with key points]

IMPORTANT: Use decimal numbers (like 7.5, 6.0, 8.5) for all scores. Do not use brackets around scores.",
        difficulty_lower = difficulty.to_string().to_lowercase(),
    )
}
