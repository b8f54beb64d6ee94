//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, terminal input,
//! and the interactive interview runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod input;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_interview, InterviewOptions, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
