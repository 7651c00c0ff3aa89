//! Extraction of numeric sub-scores from free-form evaluation text.
//!
//! The evaluation prompt asks the model for labeled decimal scores, but the
//! reply is still free text and drifts in practice. Extraction therefore
//! runs an ordered list of patterns per sub-score (exact labeled form first,
//! then a loose `label ... N/10` form) and falls back to positional
//! assignment of bare numbers when no label matched at all. The positional
//! fallback is best-effort: it cannot tell which number belongs to which
//! label once the model abandons the requested format.

pub mod metrics;

pub use metrics::{aggregate, RoleMetrics};

use regex::{Regex, RegexBuilder};

/// Lowest score value accepted during extraction.
pub const SCORE_MIN: f64 = 1.0;

/// Highest score value accepted during extraction.
pub const SCORE_MAX: f64 = 10.0;

/// Individually labeled sub-scores parsed out of one evaluation reply.
///
/// `None` means the label was not found in the text, never zero. Every
/// present value lies in `[SCORE_MIN, SCORE_MAX]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubScores {
    pub knowledge_depth: Option<f64>,
    pub implementation: Option<f64>,
    pub best_practices: Option<f64>,
    pub clarity: Option<f64>,
    pub structure: Option<f64>,
    pub professionalism: Option<f64>,
    pub experience_match: Option<f64>,
}

impl SubScores {
    /// Returns true if no sub-score was found at all.
    pub fn is_empty(&self) -> bool {
        self.knowledge_depth.is_none()
            && self.implementation.is_none()
            && self.best_practices.is_none()
            && self.clarity.is_none()
            && self.structure.is_none()
            && self.professionalism.is_none()
            && self.experience_match.is_none()
    }

    /// Mean of the technical group (knowledge depth, implementation,
    /// best practices), over the fields that were found.
    pub fn technical_mean(&self) -> Option<f64> {
        mean_of(&[self.knowledge_depth, self.implementation, self.best_practices])
    }

    /// Mean of the communication group (clarity, structure,
    /// professionalism), over the fields that were found.
    pub fn communication_mean(&self) -> Option<f64> {
        mean_of(&[self.clarity, self.structure, self.professionalism])
    }
}

fn mean_of(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Extracts a [`SubScores`] from one block of evaluation text.
///
/// Never fails: a sub-score whose patterns all miss is simply left unset.
/// Matching is case-insensitive and patterns span line breaks, so a label
/// and its `N/10` value may sit on different lines. A match outside
/// `[SCORE_MIN, SCORE_MAX]` is discarded and the next pattern is tried.
pub fn extract_scores(text: &str) -> SubScores {
    let mut scores = SubScores {
        knowledge_depth: first_score(
            text,
            &[
                r"Knowledge Depth:\s*(\d+(?:\.\d+)?)",
                r"- Knowledge Depth:\s*(\d+(?:\.\d+)?)",
                r"Knowledge.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        implementation: first_score(
            text,
            &[
                r"Implementation Understanding:\s*(\d+(?:\.\d+)?)",
                r"- Implementation Understanding:\s*(\d+(?:\.\d+)?)",
                r"Implementation.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        best_practices: first_score(
            text,
            &[
                r"Best Practices Awareness:\s*(\d+(?:\.\d+)?)",
                r"- Best Practices Awareness:\s*(\d+(?:\.\d+)?)",
                r"Best Practices.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        clarity: first_score(
            text,
            &[
                r"Clarity:\s*(\d+(?:\.\d+)?)",
                r"- Clarity:\s*(\d+(?:\.\d+)?)",
                r"Clarity.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        structure: first_score(
            text,
            &[
                r"Structure:\s*(\d+(?:\.\d+)?)",
                r"- Structure:\s*(\d+(?:\.\d+)?)",
                r"Structure.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        professionalism: first_score(
            text,
            &[
                r"Professionalism:\s*(\d+(?:\.\d+)?)",
                r"- Professionalism:\s*(\d+(?:\.\d+)?)",
                r"Professionalism.*?(\d+(?:\.\d+)?)/10",
            ],
        ),
        experience_match: first_score(
            text,
            &[
                r"Score:\s*(\d+(?:\.\d+)?)",
                r"alignment.*?(\d+(?:\.\d+)?)/10",
                r"Experience.*?Score.*?(\d+(?:\.\d+)?)",
            ],
        ),
    };

    if scores.is_empty() {
        apply_positional_fallback(text, &mut scores);
    }

    scores
}

/// Tries each pattern in priority order; the first in-range match wins.
fn first_score(text: &str, patterns: &[&str]) -> Option<f64> {
    patterns.iter().find_map(|pattern| capture_score(text, pattern))
}

/// Runs one pattern against the text and returns its captured value if it
/// parses as a number within the accepted range.
fn capture_score(text: &str, pattern: &str) -> Option<f64> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .ok()?;
    let value: f64 = re.captures(text)?.get(1)?.as_str().parse().ok()?;
    (SCORE_MIN..=SCORE_MAX).contains(&value).then_some(value)
}

/// Scans the whole text for standalone numbers in range and assigns them, in
/// order of appearance, to the canonical sub-score order. Experience match is
/// never filled this way; attribution beyond the sixth number is dropped.
fn apply_positional_fallback(text: &str, scores: &mut SubScores) {
    let Ok(re) = Regex::new(r"\b(\d+(?:\.\d+)?)\b") else {
        return;
    };
    let values = re
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| (SCORE_MIN..=SCORE_MAX).contains(v));

    let slots = [
        &mut scores.knowledge_depth,
        &mut scores.implementation,
        &mut scores.best_practices,
        &mut scores.clarity,
        &mut scores.structure,
        &mut scores.professionalism,
    ];
    for (slot, value) in slots.into_iter().zip(values) {
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EVALUATION: &str = "\
Technical Assessment:
- Knowledge Depth: 7.5 - solid fundamentals
- Implementation Understanding: 6.0 - some gaps in practice
- Best Practices Awareness: 7.0 - aware of common patterns

Communication Assessment:
- Clarity: 8.0 - easy to follow
- Structure: 7.5 - well organized
- Professionalism: 8.5 - confident tone

Experience Level Match:
- Expected Level: Mid Level (3-5 years)
- Demonstrated Level: consistent with expectations
- Score: 7.0";

    #[test]
    fn extracts_all_labeled_scores() {
        let scores = extract_scores(SAMPLE_EVALUATION);
        assert_eq!(scores.knowledge_depth, Some(7.5));
        assert_eq!(scores.implementation, Some(6.0));
        assert_eq!(scores.best_practices, Some(7.0));
        assert_eq!(scores.clarity, Some(8.0));
        assert_eq!(scores.structure, Some(7.5));
        assert_eq!(scores.professionalism, Some(8.5));
        assert_eq!(scores.experience_match, Some(7.0));
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let scores = extract_scores("knowledge depth: 6.5");
        assert_eq!(scores.knowledge_depth, Some(6.5));
    }

    #[test]
    fn loose_pattern_spans_line_breaks() {
        let text = "Clarity was assessed\nacross the answer as\n8/10 overall.";
        let scores = extract_scores(text);
        assert_eq!(scores.clarity, Some(8.0));
    }

    #[test]
    fn out_of_range_match_is_discarded() {
        // 0 and 11 both fail the range check; with no in-range alternative
        // the sub-score stays absent rather than clamping.
        assert_eq!(extract_scores("Clarity: 0").clarity, None);
        assert_eq!(extract_scores("Clarity: 11").clarity, None);
    }

    #[test]
    fn out_of_range_falls_through_to_next_pattern() {
        let text = "Clarity: 14 overall, though clarity of examples was 6/10";
        let scores = extract_scores(text);
        assert_eq!(scores.clarity, Some(6.0));
    }

    #[test]
    fn labeled_form_wins_over_loose_form() {
        let text = "Clarity: 9.0 - strong.\nClarity of diagrams only rated 5/10.";
        let scores = extract_scores(text);
        assert_eq!(scores.clarity, Some(9.0));
    }

    #[test]
    fn positional_fallback_assigns_in_canonical_order() {
        let text = "The answer rated 7 then 5.5 then 9 with no further detail.";
        let scores = extract_scores(text);
        assert_eq!(scores.knowledge_depth, Some(7.0));
        assert_eq!(scores.implementation, Some(5.5));
        assert_eq!(scores.best_practices, Some(9.0));
        assert_eq!(scores.clarity, None);
        assert_eq!(scores.structure, None);
        assert_eq!(scores.professionalism, None);
        assert_eq!(scores.experience_match, None);
    }

    #[test]
    fn positional_fallback_never_fills_experience_match() {
        let text = "ratings: 2 3 4 5 6 7 8 9";
        let scores = extract_scores(text);
        assert_eq!(scores.professionalism, Some(7.0));
        assert_eq!(scores.experience_match, None);
    }

    #[test]
    fn positional_fallback_skips_out_of_range_numbers() {
        let text = "scored 15 overall, then 6 and 90 and 3";
        let scores = extract_scores(text);
        assert_eq!(scores.knowledge_depth, Some(6.0));
        assert_eq!(scores.implementation, Some(3.0));
        assert_eq!(scores.best_practices, None);
    }

    #[test]
    fn fallback_does_not_run_when_any_label_matched() {
        let text = "Clarity: 8.0 and some stray numbers 3 4 5";
        let scores = extract_scores(text);
        assert_eq!(scores.clarity, Some(8.0));
        assert_eq!(scores.knowledge_depth, None);
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_scores(SAMPLE_EVALUATION);
        let second = extract_scores(SAMPLE_EVALUATION);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_text_yields_empty_scores() {
        assert!(extract_scores("").is_empty());
    }

    #[test]
    fn group_means_ignore_absent_fields() {
        let scores = SubScores {
            knowledge_depth: Some(8.0),
            best_practices: Some(6.0),
            ..SubScores::default()
        };
        assert_eq!(scores.technical_mean(), Some(7.0));
        assert_eq!(scores.communication_mean(), None);
    }
}
