//! Application layer - Use cases and port interfaces
//!
//! Contains the interview controller and the trait definitions
//! for external system interactions.

pub mod interview;
pub mod ports;

// Re-export use cases
pub use interview::{
    AdvanceOutcome, AnswerOutcome, InterviewController, InterviewError, SessionView, StartOutcome,
};
