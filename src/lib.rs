//! Mock Interviewer - AI-driven mock technical interviews in the terminal
//!
//! This crate runs a timed, turn-based mock interview: an AI interviewer
//! asks role- and company-tailored questions, the candidate answers by
//! typing or speaking, and the session ends with a final score.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Prompt composition, the interview state machine, value objects and errors
//! - **Application**: The interview controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, OpenAI, cpal, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and the interactive loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
