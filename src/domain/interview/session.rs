//! Interview session state machine
//!
//! State machine:
//!   AWAITING_QUESTION -> AWAITING_ANSWER (record_question)
//!   AWAITING_ANSWER   -> AWAITING_QUESTION (submit_answer, more questions left)
//!   AWAITING_ANSWER   -> SCORING (submit_answer, last answer)
//!   SCORING           -> COMPLETE (record_final_feedback)
//!
//! The session never talks to the Responder itself. The controller asks for
//! the [`PendingStep`], calls the Responder with the step's instruction, and
//! only commits the transition once the reply is in hand.

use std::fmt;
use thiserror::Error;

use super::feedback_mode::FeedbackMode;
use super::score::FinalScore;
use super::system_prompt::{question_instruction, scoring_instruction, SystemPrompt};
use super::turn::{Transcript, Turn};
use crate::domain::recording::Duration;

/// Canonical number of questions per interview
pub const DEFAULT_MAX_QUESTIONS: u32 = 5;

/// Each answer is scored out of this many points
pub const POINTS_PER_QUESTION: u32 = 5;

/// Longest interview a session accepts
pub const MAX_QUESTIONS_LIMIT: u32 = 20;

/// Interview phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    AwaitingQuestion,
    AwaitingAnswer,
    Scoring,
    Complete,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingQuestion => "awaiting question",
            Self::AwaitingAnswer => "awaiting answer",
            Self::Scoring => "scoring",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rejected session input. Returned before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Target role is required")]
    MissingRole,

    #[error("Target company is required")]
    MissingCompany,

    #[error("Number of questions must be at least 1")]
    NoQuestions,

    #[error("Number of questions must be at most {limit} (got {requested})")]
    TooManyQuestions { requested: u32, limit: u32 },

    #[error("Answer is empty. Please type or record an answer.")]
    EmptyAnswer,

    #[error("Spoken answer is too short ({recorded}). Please answer for at least {minimum}.")]
    AnswerTooShort { recorded: Duration, minimum: Duration },

    #[error("Invalid state transition: cannot {action} while in {phase} phase")]
    WrongPhase { phase: Phase, action: &'static str },
}

/// Tunables fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSettings {
    pub max_questions: u32,
    pub min_answer_duration: Duration,
    pub feedback_mode: FeedbackMode,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            min_answer_duration: Duration::default_min_answer(),
            feedback_mode: FeedbackMode::default(),
        }
    }
}

impl InterviewSettings {
    /// Highest reachable final score
    pub fn max_score(&self) -> u32 {
        self.max_questions.saturating_mul(POINTS_PER_QUESTION)
    }
}

/// The next automatic transition and the instruction that drives it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingStep {
    AskQuestion { number: u32, instruction: Turn },
    Score { instruction: Turn },
}

impl PendingStep {
    pub fn instruction(&self) -> &Turn {
        match self {
            Self::AskQuestion { instruction, .. } | Self::Score { instruction } => instruction,
        }
    }
}

/// One candidate's interview run.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    role_title: String,
    company_name: String,
    settings: InterviewSettings,
    transcript: Transcript,
    questions_asked: u32,
    questions_answered: u32,
    phase: Phase,
    final_feedback: Option<String>,
}

impl InterviewSession {
    /// Create a session seeded with the composed system prompt.
    ///
    /// Role and company are trimmed; blank values are rejected.
    pub fn new(
        role_title: &str,
        company_name: &str,
        settings: InterviewSettings,
    ) -> Result<Self, SessionError> {
        let role_title = role_title.trim();
        let company_name = company_name.trim();

        if role_title.is_empty() {
            return Err(SessionError::MissingRole);
        }
        if company_name.is_empty() {
            return Err(SessionError::MissingCompany);
        }
        if settings.max_questions == 0 {
            return Err(SessionError::NoQuestions);
        }
        if settings.max_questions > MAX_QUESTIONS_LIMIT {
            return Err(SessionError::TooManyQuestions {
                requested: settings.max_questions,
                limit: MAX_QUESTIONS_LIMIT,
            });
        }

        let prompt = SystemPrompt::compose_with_mode(
            role_title,
            company_name,
            settings.max_questions,
            settings.feedback_mode,
        );

        Ok(Self {
            role_title: role_title.to_string(),
            company_name: company_name.to_string(),
            settings,
            transcript: Transcript::new(prompt.into_content()),
            questions_asked: 0,
            questions_answered: 0,
            phase: Phase::AwaitingQuestion,
            final_feedback: None,
        })
    }

    pub fn role_title(&self) -> &str {
        &self.role_title
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn settings(&self) -> &InterviewSettings {
        &self.settings
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn max_questions(&self) -> u32 {
        self.settings.max_questions
    }

    /// Number of the question currently asked or being answered (0 before the first)
    pub fn current_question_number(&self) -> u32 {
        self.questions_asked
    }

    pub fn final_feedback(&self) -> Option<&str> {
        self.final_feedback.as_deref()
    }

    /// Score parsed out of the final feedback, if the interviewer stated one
    pub fn final_score(&self) -> Option<FinalScore> {
        self.final_feedback
            .as_deref()
            .and_then(|text| FinalScore::parse(text, self.settings.max_score()))
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// The Responder call the next `advance` needs, if any.
    ///
    /// Pure: the instruction is only appended by `record_question` or
    /// `record_final_feedback` once the call has succeeded.
    pub fn pending_step(&self) -> Option<PendingStep> {
        match self.phase {
            Phase::AwaitingQuestion => {
                let number = self.questions_asked + 1;
                let text =
                    question_instruction(number, self.settings.max_questions, self.settings.feedback_mode);
                Some(PendingStep::AskQuestion {
                    number,
                    instruction: Turn::control(text),
                })
            }
            Phase::Scoring => Some(PendingStep::Score {
                instruction: Turn::control(scoring_instruction(self.settings.max_questions)),
            }),
            Phase::AwaitingAnswer | Phase::Complete => None,
        }
    }

    /// Commit a question: append instruction and reply, count it.
    pub fn record_question(&mut self, instruction: Turn, reply: &str) -> Result<(), SessionError> {
        if self.phase != Phase::AwaitingQuestion {
            return Err(self.wrong_phase("record a question"));
        }

        self.transcript.push(instruction);
        self.transcript.push(Turn::interviewer(reply));
        self.questions_asked += 1;
        self.phase = Phase::AwaitingAnswer;

        self.debug_check_invariants();
        Ok(())
    }

    /// Record the candidate's answer to the pending question.
    pub fn submit_answer(&mut self, answer: &str) -> Result<(), SessionError> {
        if self.phase != Phase::AwaitingAnswer {
            return Err(self.wrong_phase("submit an answer"));
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        self.transcript.push(Turn::candidate(answer));
        self.questions_answered += 1;
        self.phase = if self.questions_answered < self.settings.max_questions {
            Phase::AwaitingQuestion
        } else {
            Phase::Scoring
        };

        self.debug_check_invariants();
        Ok(())
    }

    /// Minimum-duration policy for spoken answers. Does not mutate.
    pub fn check_voice_answer(&self, recorded: Duration) -> Result<(), SessionError> {
        if self.phase != Phase::AwaitingAnswer {
            return Err(self.wrong_phase("submit an answer"));
        }

        let minimum = self.settings.min_answer_duration;
        if recorded < minimum {
            return Err(SessionError::AnswerTooShort { recorded, minimum });
        }
        Ok(())
    }

    /// Commit the final feedback. Only possible once.
    pub fn record_final_feedback(
        &mut self,
        instruction: Turn,
        feedback: &str,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::Scoring {
            return Err(self.wrong_phase("record final feedback"));
        }

        self.transcript.push(instruction);
        self.transcript.push(Turn::interviewer(feedback));
        self.final_feedback = Some(feedback.to_string());
        self.phase = Phase::Complete;

        self.debug_check_invariants();
        Ok(())
    }

    fn wrong_phase(&self, action: &'static str) -> SessionError {
        SessionError::WrongPhase {
            phase: self.phase,
            action,
        }
    }

    /// Unreachable through the transitions above; a failure here is a bug.
    fn debug_check_invariants(&self) {
        debug_assert!(self.questions_answered <= self.questions_asked);
        debug_assert!(self.questions_asked <= self.settings.max_questions);
        debug_assert_eq!(
            self.final_feedback.is_some(),
            self.phase == Phase::Complete
        );
        debug_assert_eq!(
            self.transcript.turns()[0].speaker(),
            super::turn::Speaker::System
        );
    }
}
