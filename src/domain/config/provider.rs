//! Hosted model provider

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidProviderError;

/// Hosted API family used for both the Responder and the Transcriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }

    /// Chat model used when none is configured
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.0-flash",
            Self::OpenAi => "gpt-4",
        }
    }

    /// Provider that serves `model`, when the name is recognisable
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.trim().to_lowercase();
        if model.starts_with("gemini") {
            Some(Self::Gemini)
        } else if ["gpt-", "chatgpt", "o1", "o3", "o4", "whisper"]
            .iter()
            .any(|prefix| model.starts_with(prefix))
        {
            Some(Self::OpenAi)
        } else {
            None
        }
    }

    /// Environment variable holding this provider's credential
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Config key holding this provider's credential
    pub const fn api_key_config_key(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini_api_key",
            Self::OpenAi => "openai_api_key",
        }
    }
}

impl FromStr for Provider {
    type Err = InvalidProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            _ => Err(InvalidProviderError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_providers() {
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn default_models() {
        assert_eq!(Provider::OpenAi.default_model(), "gpt-4");
        assert_eq!(Provider::Gemini.default_model(), "gemini-2.0-flash");
    }

    #[test]
    fn model_owner() {
        assert_eq!(Provider::for_model("gemini-2.0-flash"), Some(Provider::Gemini));
        assert_eq!(Provider::for_model("GPT-4o"), Some(Provider::OpenAi));
        assert_eq!(Provider::for_model("o3-mini"), Some(Provider::OpenAi));
        assert_eq!(Provider::for_model("llama3"), None);
    }

    #[test]
    fn credential_names() {
        assert_eq!(Provider::Gemini.api_key_env(), "GEMINI_API_KEY");
        assert_eq!(Provider::OpenAi.api_key_config_key(), "openai_api_key");
    }
}
