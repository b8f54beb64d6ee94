//! Transcript turns

use std::fmt;

/// Who a transcript entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    /// The composed system prompt; always the first turn
    System,
    Candidate,
    Interviewer,
    /// Steering message sent to the Responder but never shown to the candidate
    ControlInstruction,
}

impl Speaker {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Candidate => "candidate",
            Self::Interviewer => "interviewer",
            Self::ControlInstruction => "control",
        }
    }

    /// Whether turns from this speaker are shown to the candidate
    pub const fn is_renderable(&self) -> bool {
        matches!(self, Self::Candidate | Self::Interviewer)
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One transcript entry. The text cannot change once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Speaker::System, text)
    }

    pub fn candidate(text: impl Into<String>) -> Self {
        Self::new(Speaker::Candidate, text)
    }

    pub fn interviewer(text: impl Into<String>) -> Self {
        Self::new(Speaker::Interviewer, text)
    }

    pub fn control(text: impl Into<String>) -> Self {
        Self::new(Speaker::ControlInstruction, text)
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only conversation history, replayed in full to the Responder.
///
/// The head is always the System turn; nothing can remove or replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Start a transcript with the system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    /// Append a non-system turn. A second System turn is refused.
    pub(crate) fn push(&mut self, turn: Turn) {
        debug_assert_ne!(turn.speaker(), Speaker::System);
        if turn.speaker() != Speaker::System {
            self.turns.push(turn);
        }
    }

    /// Copy of this transcript with one extra turn appended
    pub fn with_turn(&self, turn: Turn) -> Self {
        let mut next = self.clone();
        next.push(turn);
        next
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The system prompt text
    pub fn system_prompt(&self) -> &str {
        self.turns.first().map(Turn::text).unwrap_or_default()
    }

    /// Turns after the system prompt, in order
    pub fn conversation(&self) -> &[Turn] {
        self.turns.get(1..).unwrap_or_default()
    }

    /// Turns shown to the candidate: no system prompt, no control instructions
    pub fn renderable(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.speaker().is_renderable())
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// A transcript built through `new` always holds its system turn
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent turn; only `None` if the system turn were missing
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
