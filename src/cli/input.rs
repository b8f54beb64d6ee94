//! Interactive terminal input
//!
//! Reads lines from stdin without blocking the runtime and races each read
//! against Ctrl-C.

use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line reader over stdin
pub struct LineReader {
    lines: Lines<BufReader<Stdin>>,
}

impl LineReader {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }

    /// Next line with the trailing newline removed.
    ///
    /// Returns `None` on EOF or Ctrl-C.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        tokio::select! {
            line = self.lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => Ok(None),
        }
    }

    /// Ask until a non-blank value is entered; `None` on EOF or Ctrl-C
    pub async fn prompt_non_empty(
        &mut self,
        mut show_prompt: impl FnMut(),
    ) -> io::Result<Option<String>> {
        loop {
            show_prompt();
            match self.next_line().await? {
                Some(line) if !line.trim().is_empty() => return Ok(Some(line.trim().to_string())),
                Some(_) => continue,
                None => return Ok(None),
            }
        }
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

/// What the candidate typed at the answer prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Plain text answer
    Answer(String),
    /// `/voice`: record a spoken answer
    Voice,
    /// `/status`: show progress
    Status,
    /// `/restart`: discard the session and start over
    Restart,
    /// `/quit` or `/exit`
    Quit,
    /// `/help`
    Help,
    /// Any other slash command
    Unknown(String),
}

impl SessionCommand {
    /// Classify one input line
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix('/') else {
            return Self::Answer(trimmed.to_string());
        };

        match command.to_lowercase().as_str() {
            "voice" | "v" => Self::Voice,
            "status" => Self::Status,
            "restart" => Self::Restart,
            "quit" | "exit" | "q" => Self::Quit,
            "help" | "?" => Self::Help,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// Help text for in-session commands
pub const SESSION_HELP: &str = "/voice    record a spoken answer (press Enter to stop)\n\
/status   show interview progress\n\
/restart  discard this interview and start a new one\n\
/quit     leave the interview";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_an_answer() {
        assert_eq!(
            SessionCommand::parse("  I would use a hash map.  "),
            SessionCommand::Answer("I would use a hash map.".to_string())
        );
    }

    #[test]
    fn blank_line_is_an_empty_answer() {
        assert_eq!(
            SessionCommand::parse("   "),
            SessionCommand::Answer(String::new())
        );
    }

    #[test]
    fn slash_commands() {
        assert_eq!(SessionCommand::parse("/voice"), SessionCommand::Voice);
        assert_eq!(SessionCommand::parse("/STATUS"), SessionCommand::Status);
        assert_eq!(SessionCommand::parse("/restart"), SessionCommand::Restart);
        assert_eq!(SessionCommand::parse("/exit"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("/help"), SessionCommand::Help);
        assert_eq!(
            SessionCommand::parse("/dance"),
            SessionCommand::Unknown("/dance".to_string())
        );
    }
}
