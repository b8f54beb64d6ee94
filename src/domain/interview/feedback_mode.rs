//! Feedback timing

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidFeedbackModeError;

/// When the interviewer scores answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeedbackMode {
    /// Withhold all feedback until the final score
    #[default]
    Deferred,
    /// Score each answer (1-5) before asking the next question
    Immediate,
}

impl FeedbackMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deferred => "deferred",
            Self::Immediate => "immediate",
        }
    }
}

impl FromStr for FeedbackMode {
    type Err = InvalidFeedbackModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deferred" => Ok(Self::Deferred),
            "immediate" => Ok(Self::Immediate),
            _ => Err(InvalidFeedbackModeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FeedbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!(
            "deferred".parse::<FeedbackMode>().unwrap(),
            FeedbackMode::Deferred
        );
        assert_eq!(
            " Immediate ".parse::<FeedbackMode>().unwrap(),
            FeedbackMode::Immediate
        );
        assert!("later".parse::<FeedbackMode>().is_err());
    }

    #[test]
    fn default_is_deferred() {
        assert_eq!(FeedbackMode::default(), FeedbackMode::Deferred);
        assert_eq!(FeedbackMode::default().to_string(), "deferred");
    }
}
