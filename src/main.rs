//! Mock Interviewer CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mock_interviewer::cli::{
    app::{load_merged_config, resolve_api_key, run_interview, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    InterviewOptions,
};
use mock_interviewer::domain::config::{AppConfig, Provider};
use mock_interviewer::domain::interview::{FeedbackMode, InterviewSettings, MAX_QUESTIONS_LIMIT};
use mock_interviewer::domain::recording::Duration;
use mock_interviewer::infrastructure::XdgConfigStore;

/// Log filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,mock_interviewer=debug"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        provider: cli.provider.map(|p| Provider::from(p).to_string()),
        gemini_api_key: None, // API keys come from env/file only
        openai_api_key: None,
        model: cli.model.clone(),
        max_questions: cli.questions,
        min_answer_duration: cli.min_answer.clone(),
        feedback_mode: cli.feedback.map(|f| FeedbackMode::from(f).to_string()),
        voice: if cli.voice { Some(true) } else { None },
        request_timeout: cli.timeout.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let provider = match config.provider.as_deref().map(str::parse::<Provider>) {
        Some(Ok(p)) => p,
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => Provider::default(),
    };

    let min_answer_duration = match parse_duration(config.min_answer_duration.as_deref()) {
        Ok(d) => d.unwrap_or_else(Duration::default_min_answer),
        Err(e) => {
            presenter.error(&format!("Invalid min-answer: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let request_timeout = match parse_duration(config.request_timeout.as_deref()) {
        Ok(d) => d.unwrap_or_else(Duration::default_request_timeout),
        Err(e) => {
            presenter.error(&format!("Invalid timeout: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let feedback_mode = match config.feedback_mode.as_deref().map(str::parse::<FeedbackMode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => FeedbackMode::default(),
    };

    if let Some(n) = config.max_questions {
        if !(1..=MAX_QUESTIONS_LIMIT).contains(&n) {
            presenter.error(&format!(
                "Invalid max_questions: {} (must be from 1 to {})",
                n, MAX_QUESTIONS_LIMIT
            ));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    if let Some(model) = config.mismatched_model() {
        presenter.warn(&format!(
            "Model '{}' is not a {} model, using {}",
            model,
            provider,
            provider.default_model()
        ));
    }

    // Missing credentials are a configuration error
    let api_key = match resolve_api_key(&config, provider) {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = InterviewOptions {
        role: cli.role,
        company: cli.company,
        provider,
        api_key,
        model: config.model_or_default(),
        settings: InterviewSettings {
            max_questions: config.max_questions_or_default(),
            min_answer_duration,
            feedback_mode,
        },
        voice: config.voice_or_default(),
        request_timeout,
    };

    run_interview(options).await
}

fn parse_duration(value: Option<&str>) -> Result<Option<Duration>, String> {
    value
        .map(|s| s.parse::<Duration>().map_err(|e| e.to_string()))
        .transpose()
}
