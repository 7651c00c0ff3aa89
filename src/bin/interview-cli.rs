use std::io::{self, Write};
use std::str::FromStr;

use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use spinners::{Spinner, Spinners};

use interview_assistant::backends::google::Google;
use interview_assistant::builder::GeneratorBuilder;
use interview_assistant::config::{self, Difficulty, InterviewType};
use interview_assistant::error::InterviewError;
use interview_assistant::interview::{InterviewSettings, Interviewer};
use interview_assistant::session::{QuestionAndAnswer, Session};

/// Command line arguments for the interview CLI
#[derive(Parser)]
#[clap(
    name = "interview",
    about = "Interactive interview practice powered by Google Gemini"
)]
struct CliArgs {
    /// Job role to interview for
    #[arg(long, default_value = "Software Engineer")]
    role: String,

    /// Experience expectation for the role
    #[arg(long, default_value = "Mid Level (3-5 years)")]
    experience: String,

    /// Interview type: technical, behavioral or problem-solving
    #[arg(long = "type", default_value = "technical")]
    interview_type: String,

    /// Difficulty: easy, medium, hard or legend
    #[arg(long, default_value = "medium")]
    difficulty: String,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// API key; falls back to the GOOGLE_API_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,

    /// List the models available to the API key and exit
    #[arg(long)]
    list_models: bool,

    /// List the built-in roles, experience levels, types and difficulties
    #[arg(long)]
    catalog: bool,

    /// Write the session export JSON to this file on exit
    #[arg(long)]
    export: Option<std::path::PathBuf>,
}

/// Main entry point for the interview CLI application
///
/// Starts an interview for the configured role, then loops: show the current
/// question, read the candidate's answer, evaluate it, print the assessment
/// and running scores, and move on to the follow-up question.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    interview_assistant::init_logging();
    let args = CliArgs::parse();

    if args.catalog {
        println!("{}", "Roles:".bright_cyan());
        for role in config::JOB_ROLES {
            println!("  {role}");
        }
        println!("{}", "Experience levels:".bright_cyan());
        for level in config::EXPERIENCE_LEVELS {
            println!("  {level}");
        }
        println!("{}", "Types: technical, behavioral, problem-solving".bright_cyan());
        println!("{}", "Difficulties: easy, medium, hard, legend".bright_cyan());
        return Ok(());
    }

    let api_key = args
        .api_key
        .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
        .unwrap_or_default();
    if api_key.is_empty() {
        eprintln!(
            "{} No API key. Pass --api-key or set GOOGLE_API_KEY.",
            "Error:".bright_red()
        );
        std::process::exit(1);
    }

    if args.list_models {
        let google = Google::new(api_key, args.model, None, None, None, None, None);
        for model in google.list_models().await? {
            println!("{model}");
        }
        return Ok(());
    }

    let settings = InterviewSettings {
        role: args.role,
        experience: args.experience,
        interview_type: InterviewType::from_str(&args.interview_type)?,
        difficulty: Difficulty::from_str(&args.difficulty)?,
    };

    let generator = GeneratorBuilder::new()
        .api_key(api_key)
        .model(args.model.unwrap_or_else(|| config::DEFAULT_MODEL.to_string()))
        .temperature(config::DEFAULT_TEMPERATURE)
        .top_p(config::DEFAULT_TOP_P)
        .top_k(config::DEFAULT_TOP_K)
        .resilient(true)
        .build()?;
    let interviewer = Interviewer::new(generator);
    let mut session = Session::new();

    println!("{}", "interview - Practice Session".bright_cyan());
    println!(
        "Role: {}  |  {}  |  {} / {}",
        settings.role.bright_green(),
        settings.experience.bright_green(),
        settings.interview_type.to_string().bright_green(),
        settings.difficulty.to_string().bright_green()
    );
    println!("{}", "Type 'exit' to quit".bright_black());
    println!("{}", "─".repeat(50).bright_black());

    let mut sp = Spinner::new(
        Spinners::Dots12,
        "Preparing the first question...".bright_magenta().to_string(),
    );
    let first = interviewer.start_interview(&mut session, &settings).await;
    sp.stop();
    print!("\r\x1B[K");
    let mut current = match first {
        Ok(qa) => qa,
        Err(e) => {
            eprintln!("{} {}", "Error:".bright_red(), e);
            std::process::exit(1);
        }
    };

    let mut rl = DefaultEditor::new()?;

    loop {
        println!("{} {}", "> Question:".bright_green(), current.question);
        io::stdout().flush()?;
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.to_lowercase() == "exit" {
                    println!("{}", "👋 Goodbye!".bright_cyan());
                    break;
                }
                let _ = rl.add_history_entry(trimmed);

                let mut sp = Spinner::new(
                    Spinners::Dots12,
                    "Analyzing your response...".bright_magenta().to_string(),
                );
                let outcome = interviewer.process_answer(&mut session, &settings, trimmed).await;
                sp.stop();
                print!("\r\x1B[K");

                match outcome {
                    Ok(evaluation) => {
                        println!("{}\n{}", "> Assessment:".bright_green(), evaluation.assessment);
                        let metrics = session.stats().role_specific_metrics;
                        println!(
                            "{} overall {:.1}  domain {:.1}  methodology {:.1}  experience {:.1}  ({} answered)",
                            "> Scores:".bright_yellow(),
                            metrics.overall_score,
                            metrics.domain_knowledge,
                            metrics.methodology_understanding,
                            metrics.practical_experience,
                            session.stats().total_questions
                        );
                        println!("{}", "─".repeat(50).bright_black());
                        current = QuestionAndAnswer {
                            question: evaluation.follow_up_question,
                            expected_answer: evaluation.follow_up_expected,
                        };
                    }
                    Err(InterviewError::InvalidInput(message)) => {
                        println!("{} {}", "!".bright_yellow(), message);
                    }
                    Err(InterviewError::RateLimited { wait_ms }) => {
                        println!(
                            "{} Please wait {:.1} seconds before submitting another response.",
                            "!".bright_yellow(),
                            wait_ms as f64 / 1000.0
                        );
                    }
                    Err(e @ (InterviewError::QuotaExceeded(_) | InterviewError::AuthError(_))) => {
                        eprintln!("{} {}", "Error:".bright_red(), e);
                        break;
                    }
                    Err(e) => {
                        eprintln!("{} {}", "Error:".bright_red(), e);
                        println!("{}", "─".repeat(50).bright_black());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{}", "👋 Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".bright_red(), err);
                break;
            }
        }
    }

    if let Some(path) = args.export {
        std::fs::write(&path, session.export_json()?)?;
        println!("Session exported to {}", path.display());
    }

    Ok(())
}
