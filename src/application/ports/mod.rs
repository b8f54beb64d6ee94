//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod recorder;
pub mod responder;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use recorder::{AnswerRecorder, RecordingError};
pub use responder::{ChunkCallback, Responder, ResponderError};
pub use transcriber::{Transcriber, TranscriptionError};
