//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini and OpenAI APIs,
//! the microphone and the config file.

mod http;

pub mod config;
pub mod recording;
pub mod responder;
pub mod transcription;

// Re-export adapters
pub use config::XdgConfigStore;
pub use recording::CpalRecorder;
pub use responder::{GeminiResponder, OpenAiResponder};
pub use transcription::{GeminiTranscriber, OpenAiTranscriber};
