//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::Provider;
use crate::domain::interview::{FeedbackMode, MAX_QUESTIONS_LIMIT};

/// Mock Interviewer - practice technical interviews with an AI interviewer
#[derive(Parser, Debug)]
#[command(name = "mock-interviewer")]
#[command(version)]
#[command(about = "AI mock interviewer: role- and company-tailored questions, voice answers and a final score")]
#[command(long_about = None)]
pub struct Cli {
    /// Target role (prompted for when omitted)
    #[arg(short = 'r', long, value_name = "ROLE")]
    pub role: Option<String>,

    /// Target company (prompted for when omitted)
    #[arg(short = 'c', long, value_name = "COMPANY")]
    pub company: Option<String>,

    /// Number of questions to ask
    #[arg(short = 'q', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_QUESTIONS_LIMIT)))]
    pub questions: Option<u32>,

    /// Shortest accepted spoken answer (e.g., 30s, 1m)
    #[arg(long, value_name = "TIME")]
    pub min_answer: Option<String>,

    /// When the interviewer gives feedback
    #[arg(long, value_name = "MODE")]
    pub feedback: Option<FeedbackArg>,

    /// Model provider for questions and transcription
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<ProviderArg>,

    /// Chat model override (default depends on provider)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Record spoken answers by default
    #[arg(long)]
    pub voice: bool,

    /// Per-request timeout for the model APIs (e.g., 30s, 2m)
    #[arg(long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Show debug logs on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Feedback mode argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeedbackArg {
    /// Withhold all feedback until the final score
    Deferred,
    /// Score each answer before the next question
    Immediate,
}

impl From<FeedbackArg> for FeedbackMode {
    fn from(arg: FeedbackArg) -> Self {
        match arg {
            FeedbackArg::Deferred => FeedbackMode::Deferred,
            FeedbackArg::Immediate => FeedbackMode::Immediate,
        }
    }
}

/// Provider argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Gemini,
    Openai,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Gemini => Provider::Gemini,
            ProviderArg::Openai => Provider::OpenAi,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "provider",
    "gemini_api_key",
    "openai_api_key",
    "model",
    "max_questions",
    "min_answer_duration",
    "feedback_mode",
    "voice",
    "request_timeout",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["mock-interviewer"]);
        assert!(cli.role.is_none());
        assert!(cli.company.is_none());
        assert!(cli.questions.is_none());
        assert!(cli.feedback.is_none());
        assert!(cli.provider.is_none());
        assert!(!cli.voice);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_role_and_company() {
        let cli = Cli::parse_from([
            "mock-interviewer",
            "-r",
            "Backend Engineer",
            "--company",
            "Amazon",
        ]);
        assert_eq!(cli.role.as_deref(), Some("Backend Engineer"));
        assert_eq!(cli.company.as_deref(), Some("Amazon"));
    }

    #[test]
    fn cli_parses_interview_options() {
        let cli = Cli::parse_from([
            "mock-interviewer",
            "-q",
            "3",
            "--min-answer",
            "45s",
            "--feedback",
            "immediate",
            "--provider",
            "openai",
            "--voice",
        ]);
        assert_eq!(cli.questions, Some(3));
        assert_eq!(cli.min_answer.as_deref(), Some("45s"));
        assert_eq!(cli.feedback, Some(FeedbackArg::Immediate));
        assert_eq!(cli.provider, Some(ProviderArg::Openai));
        assert!(cli.voice);
    }

    #[test]
    fn cli_rejects_zero_questions() {
        assert!(Cli::try_parse_from(["mock-interviewer", "-q", "0"]).is_err());
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["mock-interviewer", "config", "set", "max_questions", "3"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "max_questions");
            assert_eq!(value, "3");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn arg_enums_convert() {
        assert_eq!(Provider::from(ProviderArg::Openai), Provider::OpenAi);
        assert_eq!(
            FeedbackMode::from(FeedbackArg::Deferred),
            FeedbackMode::Deferred
        );
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("gemini_api_key"));
        assert!(is_valid_config_key("min_answer_duration"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
