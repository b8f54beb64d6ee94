//! Domain layer - Core business logic
//!
//! Contains value objects, the interview session aggregate, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod interview;
pub mod recording;
pub mod transcription;

// Re-export common types
pub use config::{AppConfig, Provider};
pub use error::*;
pub use interview::{
    FeedbackMode, FinalScore, InterviewSession, InterviewSettings, Phase, SessionError, Speaker,
    SystemPrompt, Transcript, Turn,
};
pub use recording::Duration;
pub use transcription::{AudioData, AudioMimeType, PcmAudio};
