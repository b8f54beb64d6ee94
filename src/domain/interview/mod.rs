//! Interview domain module
//!
//! The prompt composer and the turn-taking state machine that drives one
//! mock interview.

mod company;
mod feedback_mode;
mod score;
mod session;
mod system_prompt;
mod turn;

pub use company::{company_values, title_case, CompanyValues, COMPANY_VALUES, GENERIC_VALUES};
pub use feedback_mode::FeedbackMode;
pub use score::FinalScore;
pub use session::{
    InterviewSession, InterviewSettings, PendingStep, Phase, SessionError,
    DEFAULT_MAX_QUESTIONS, MAX_QUESTIONS_LIMIT, POINTS_PER_QUESTION,
};
pub use system_prompt::SystemPrompt;
pub use turn::{Speaker, Transcript, Turn};
