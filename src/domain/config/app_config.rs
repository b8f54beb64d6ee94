//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::provider::Provider;
use crate::domain::interview::{
    FeedbackMode, InterviewSettings, DEFAULT_MAX_QUESTIONS, MAX_QUESTIONS_LIMIT,
};
use crate::domain::recording::Duration;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub model: Option<String>,
    pub max_questions: Option<u32>,
    pub min_answer_duration: Option<String>,
    pub feedback_mode: Option<String>,
    pub voice: Option<bool>,
    pub request_timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values.
    /// `model` stays unset because its default depends on the provider.
    pub fn defaults() -> Self {
        Self {
            provider: Some(Provider::default().to_string()),
            gemini_api_key: None,
            openai_api_key: None,
            model: None,
            max_questions: Some(DEFAULT_MAX_QUESTIONS),
            min_answer_duration: Some(Duration::default_min_answer().to_string()),
            feedback_mode: Some(FeedbackMode::default().to_string()),
            voice: Some(false),
            request_timeout: Some(Duration::default_request_timeout().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            provider: other.provider.or(self.provider),
            gemini_api_key: other.gemini_api_key.or(self.gemini_api_key),
            openai_api_key: other.openai_api_key.or(self.openai_api_key),
            model: other.model.or(self.model),
            max_questions: other.max_questions.or(self.max_questions),
            min_answer_duration: other.min_answer_duration.or(self.min_answer_duration),
            feedback_mode: other.feedback_mode.or(self.feedback_mode),
            voice: other.voice.or(self.voice),
            request_timeout: other.request_timeout.or(self.request_timeout),
        }
    }

    /// Get provider, or Gemini if not set/invalid
    pub fn provider_or_default(&self) -> Provider {
        self.provider
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Credential for the selected provider
    pub fn api_key_for(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Gemini => self.gemini_api_key.as_deref(),
            Provider::OpenAi => self.openai_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    /// Get the chat model, or the provider's default.
    ///
    /// A model that belongs to the other provider is replaced by the default.
    pub fn model_or_default(&self) -> String {
        let provider = self.provider_or_default();
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .filter(|m| Provider::for_model(m).map_or(true, |owner| owner == provider))
            .map(str::to_string)
            .unwrap_or_else(|| provider.default_model().to_string())
    }

    /// Configured model that belongs to a different provider than the selected one
    pub fn mismatched_model(&self) -> Option<&str> {
        let provider = self.provider_or_default();
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| Provider::for_model(m).is_some_and(|owner| owner != provider))
    }

    /// Get max_questions, or 5 if not set or out of range
    pub fn max_questions_or_default(&self) -> u32 {
        self.max_questions
            .filter(|n| (1..=MAX_QUESTIONS_LIMIT).contains(n))
            .unwrap_or(DEFAULT_MAX_QUESTIONS)
    }

    /// Get min_answer_duration as parsed Duration, or 30s if not set/invalid
    pub fn min_answer_duration_or_default(&self) -> Duration {
        self.min_answer_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_min_answer)
    }

    /// Get feedback mode, or deferred if not set/invalid
    pub fn feedback_mode_or_default(&self) -> FeedbackMode {
        self.feedback_mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get voice setting, or false if not set
    pub fn voice_or_default(&self) -> bool {
        self.voice.unwrap_or(false)
    }

    /// Get request timeout, or 60s if not set/invalid
    pub fn request_timeout_or_default(&self) -> Duration {
        self.request_timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_request_timeout)
    }

    /// Session tunables derived from this config
    pub fn interview_settings(&self) -> InterviewSettings {
        InterviewSettings {
            max_questions: self.max_questions_or_default(),
            min_answer_duration: self.min_answer_duration_or_default(),
            feedback_mode: self.feedback_mode_or_default(),
        }
    }
}
