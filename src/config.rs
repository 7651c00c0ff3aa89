//! Static interview catalog and model defaults.
//!
//! Mirrors what a deployment would normally keep in configuration: the list
//! of supported job roles, interview types with their focus areas, difficulty
//! and experience levels, and the Gemini generation defaults.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InterviewError;

/// Default Gemini model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default top-p (nucleus) sampling parameter.
pub const DEFAULT_TOP_P: f32 = 0.8;

/// Default top-k sampling parameter.
pub const DEFAULT_TOP_K: u32 = 40;

/// Job roles offered by the interview catalog.
pub const JOB_ROLES: &[&str] = &[
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "Full Stack Developer",
    "AI/ML Engineer",
    "DevOps Engineer",
];

/// Experience expectation ranges offered by the interview catalog.
pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Entry Level (0-2 years)",
    "Mid Level (3-5 years)",
    "Senior Level (6-9 years)",
    "Expert Level (10+ years)",
];

/// Style of interview question to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    /// Tests specific knowledge and problem-solving skills
    Technical,
    /// Assesses past experiences and soft skills
    Behavioral,
    /// Evaluates analytical thinking on open-ended problems
    ProblemSolving,
}

impl InterviewType {
    /// Focus areas woven into the question-generation prompt for this type.
    pub fn focus_points(&self) -> &'static str {
        match self {
            InterviewType::Technical => {
                "core concepts and hands-on implementation, tooling and debugging habits"
            }
            InterviewType::Behavioral => {
                "past experiences and collaboration, ownership and communication"
            }
            InterviewType::ProblemSolving => {
                "analytical reasoning and trade-off analysis, structured decomposition"
            }
        }
    }
}

impl std::fmt::Display for InterviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterviewType::Technical => write!(f, "Technical"),
            InterviewType::Behavioral => write!(f, "Behavioral"),
            InterviewType::ProblemSolving => write!(f, "Problem Solving"),
        }
    }
}

impl FromStr for InterviewType {
    type Err = InterviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "technical" => Ok(InterviewType::Technical),
            "behavioral" => Ok(InterviewType::Behavioral),
            "problem_solving" => Ok(InterviewType::ProblemSolving),
            _ => Err(InterviewError::InvalidRequest(format!(
                "Unknown interview type: {s}"
            ))),
        }
    }
}

/// Difficulty tier for generated questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Core concepts, fundamentals, daily tasks
    Easy,
    /// Applied knowledge, real scenarios, problem-solving
    Medium,
    /// Complex problems, system design, edge cases
    Hard,
    /// Expert challenges, architecture decisions, innovation
    Legend,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Legend => write!(f, "Legend"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = InterviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "legend" => Ok(Difficulty::Legend),
            _ => Err(InterviewError::InvalidRequest(format!(
                "Unknown difficulty: {s}"
            ))),
        }
    }
}
