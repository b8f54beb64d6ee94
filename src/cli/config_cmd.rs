//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, Provider};
use crate::domain::error::ConfigError;
use crate::domain::interview::{FeedbackMode, MAX_QUESTIONS_LIMIT};
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = if is_secret(key) {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match display_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn is_secret(key: &str) -> bool {
    key.ends_with("_api_key")
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "provider" => {
            let provider = value
                .parse::<Provider>()
                .map_err(|e| invalid(e.to_string()))?;
            config.provider = Some(provider.to_string());
        }
        "gemini_api_key" => config.gemini_api_key = Some(non_blank(value).map_err(invalid)?),
        "openai_api_key" => config.openai_api_key = Some(non_blank(value).map_err(invalid)?),
        "model" => config.model = Some(non_blank(value).map_err(invalid)?),
        "max_questions" => {
            let n = value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_QUESTIONS_LIMIT).contains(n))
                .ok_or_else(|| {
                    invalid(format!(
                        "Value must be a whole number from 1 to {}",
                        MAX_QUESTIONS_LIMIT
                    ))
                })?;
            config.max_questions = Some(n);
        }
        "min_answer_duration" | "request_timeout" => {
            let duration = value
                .parse::<Duration>()
                .map_err(|e| invalid(e.to_string()))?;
            let normalized = Some(duration.to_string());
            if key == "min_answer_duration" {
                config.min_answer_duration = normalized;
            } else {
                config.request_timeout = normalized;
            }
        }
        "feedback_mode" => {
            let mode = value
                .parse::<FeedbackMode>()
                .map_err(|e| invalid(e.to_string()))?;
            config.feedback_mode = Some(mode.to_string());
        }
        "voice" => {
            config.voice = Some(
                parse_bool(value)
                    .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            );
        }
        _ => return ensure_known_key(key),
    }

    Ok(())
}

/// Value of `key` as shown to the user, API keys masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "provider" => config.provider.clone(),
        "gemini_api_key" => config.gemini_api_key.as_deref().map(mask_api_key),
        "openai_api_key" => config.openai_api_key.as_deref().map(mask_api_key),
        "model" => config.model.clone(),
        "max_questions" => config.max_questions.map(|n| n.to_string()),
        "min_answer_duration" => config.min_answer_duration.clone(),
        "feedback_mode" => config.feedback_mode.clone(),
        "voice" => config.voice.map(|b| b.to_string()),
        "request_timeout" => config.request_timeout.clone(),
        _ => None,
    }
}

fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("Value must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
