//! Aggregation of per-assessment sub-scores into role-level metrics.

use serde::{Deserialize, Serialize};

use crate::session::Message;

use super::extract_scores;

/// Weight of the technical group in the overall score.
const DOMAIN_WEIGHT: f64 = 0.5;

/// Weight of the experience-match group in the overall score.
const EXPERIENCE_WEIGHT: f64 = 0.3;

/// Weight of the communication group in the overall score.
const COMMUNICATION_WEIGHT: f64 = 0.2;

/// Substituted for a group with no parsed samples, so an unparseable reply
/// reads as "middling" instead of zero.
pub const PARSE_FALLBACK_SCORE: f64 = 6.0;

/// Role-level composite metrics over the whole interview so far.
///
/// Recomputed from scratch after every answer; a fresh value supersedes the
/// previous one. All-zero metrics mean "no evaluations have happened yet",
/// which is distinct from "evaluations happened but could not be parsed"
/// (those come back as [`PARSE_FALLBACK_SCORE`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMetrics {
    /// Technical competence, from the knowledge/implementation/practices group
    pub domain_knowledge: f64,
    /// Communication quality, from the clarity/structure/professionalism group
    pub methodology_understanding: f64,
    /// Experience-level match score
    pub practical_experience: f64,
    /// Weighted composite of the three groups
    pub overall_score: f64,
}

/// Folds the full message history into one [`RoleMetrics`] value.
///
/// Every assistant assessment in `messages` is parsed for sub-scores; each
/// assessment contributes at most one sample per group (the mean of its
/// populated fields in that group), and samples are averaged across
/// assessments. The overall score weights technical competence highest,
/// experience match second and communication third. All four fields are
/// rounded to one decimal.
pub fn aggregate(role: &str, experience: &str, messages: &[Message]) -> RoleMetrics {
    let mut technical = Vec::new();
    let mut communication = Vec::new();
    let mut experience_match = Vec::new();
    let mut assessment_count = 0usize;

    for message in messages {
        let Message::Assessment(content) = message else {
            continue;
        };
        assessment_count += 1;

        let scores = extract_scores(content);
        if let Some(value) = scores.technical_mean() {
            technical.push(value);
        }
        if let Some(value) = scores.communication_mean() {
            communication.push(value);
        }
        if let Some(value) = scores.experience_match {
            experience_match.push(value);
        }
    }

    // No assessments at all: signal "nothing evaluated yet" rather than
    // substituting fallback values.
    if assessment_count == 0 {
        log::debug!("no assessments yet for {role} ({experience})");
        return RoleMetrics::default();
    }

    let domain_knowledge = mean_or(&technical, PARSE_FALLBACK_SCORE);
    let methodology_understanding = mean_or(&communication, PARSE_FALLBACK_SCORE);
    let practical_experience = mean_or(&experience_match, PARSE_FALLBACK_SCORE);

    let overall_score = domain_knowledge * DOMAIN_WEIGHT
        + practical_experience * EXPERIENCE_WEIGHT
        + methodology_understanding * COMMUNICATION_WEIGHT;

    let metrics = RoleMetrics {
        domain_knowledge: round1(domain_knowledge),
        methodology_understanding: round1(methodology_understanding),
        practical_experience: round1(practical_experience),
        overall_score: round1(overall_score),
    };
    log::debug!(
        "aggregated {assessment_count} assessment(s) for {role} ({experience}): {metrics:?}"
    );
    metrics
}

fn mean_or(samples: &[f64], fallback: f64) -> f64 {
    if samples.is_empty() {
        fallback
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::QuestionAndAnswer;

    fn assessment(text: &str) -> Message {
        Message::Assessment(text.to_string())
    }

    #[test]
    fn empty_history_yields_all_zero_metrics() {
        let metrics = aggregate("Software Engineer", "Mid Level (3-5 years)", &[]);
        assert_eq!(metrics, RoleMetrics::default());
        assert_eq!(metrics.overall_score, 0.0);
    }

    #[test]
    fn non_assessment_messages_are_ignored() {
        let messages = vec![
            Message::Question(QuestionAndAnswer {
                question: "What is ownership?".into(),
                expected_answer: "Each value has a single owner.".into(),
            }),
            Message::Answer("Ownership means 8 out of 10 things.".into()),
        ];
        let metrics = aggregate("Software Engineer", "Entry Level (0-2 years)", &messages);
        assert_eq!(metrics, RoleMetrics::default());
    }

    #[test]
    fn unparseable_assessment_falls_back_to_middling_scores() {
        let messages = vec![assessment("The candidate did fine, more or less.")];
        let metrics = aggregate("Data Scientist", "Mid Level (3-5 years)", &messages);
        assert_eq!(metrics.domain_knowledge, PARSE_FALLBACK_SCORE);
        assert_eq!(metrics.methodology_understanding, PARSE_FALLBACK_SCORE);
        assert_eq!(metrics.practical_experience, PARSE_FALLBACK_SCORE);
        assert_eq!(metrics.overall_score, PARSE_FALLBACK_SCORE);
    }

    #[test]
    fn overall_score_is_weighted() {
        // domain 8.0, experience 7.0, communication 6.0
        // overall = 0.5 * 8.0 + 0.3 * 7.0 + 0.2 * 6.0 = 7.3
        let text = "\
Knowledge Depth: 8.0
Implementation Understanding: 8.0
Best Practices Awareness: 8.0
Clarity: 6.0
Structure: 6.0
Professionalism: 6.0
Score: 7.0";
        let metrics = aggregate("AI/ML Engineer", "Senior Level (6-9 years)", &[assessment(text)]);
        assert_eq!(metrics.domain_knowledge, 8.0);
        assert_eq!(metrics.methodology_understanding, 6.0);
        assert_eq!(metrics.practical_experience, 7.0);
        assert_eq!(metrics.overall_score, 7.3);
    }

    #[test]
    fn groups_average_within_one_assessment() {
        let text = "Knowledge Depth: 9.0\nImplementation Understanding: 7.0\nScore: 8.0";
        let metrics = aggregate("DevOps Engineer", "Mid Level (3-5 years)", &[assessment(text)]);
        // technical mean is (9 + 7) / 2; communication had no samples
        assert_eq!(metrics.domain_knowledge, 8.0);
        assert_eq!(metrics.methodology_understanding, PARSE_FALLBACK_SCORE);
        assert_eq!(metrics.practical_experience, 8.0);
    }

    #[test]
    fn samples_average_across_assessments() {
        let messages = vec![
            assessment("Clarity: 6.0\nScore: 6.0"),
            assessment("Clarity: 8.0\nScore: 8.0"),
        ];
        let metrics = aggregate("Product Manager", "Entry Level (0-2 years)", &messages);
        assert_eq!(metrics.methodology_understanding, 7.0);
        assert_eq!(metrics.practical_experience, 7.0);
    }

    #[test]
    fn metrics_round_to_one_decimal() {
        let messages = vec![
            assessment("Clarity: 7.0\nScore: 7.0"),
            assessment("Clarity: 8.0\nScore: 8.0"),
            assessment("Clarity: 8.0\nScore: 8.0"),
        ];
        let metrics = aggregate("Software Engineer", "Mid Level (3-5 years)", &messages);
        // communication mean is 23/3 = 7.666...
        assert_eq!(metrics.methodology_understanding, 7.7);
    }
}
