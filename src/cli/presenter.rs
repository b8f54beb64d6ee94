//! CLI presenter for output formatting

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::ChunkCallback;
use crate::application::SessionView;
use crate::domain::interview::{FinalScore, Speaker, Turn};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Callback that prints streamed interviewer text to stdout.
    ///
    /// The first chunk clears the active spinner and prints `label`. The
    /// returned flag reports whether anything was streamed.
    pub fn streaming_callback(&self, label: String) -> (ChunkCallback, Arc<AtomicBool>) {
        let spinner = self.spinner.clone();
        let spinner_active = Arc::clone(&self.is_spinner_active);
        let streamed = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&streamed);

        let callback: ChunkCallback = Arc::new(move |chunk: &str| {
            if !seen.swap(true, Ordering::SeqCst) {
                if let Some(ref spinner) = spinner {
                    spinner.finish_and_clear();
                }
                spinner_active.store(false, Ordering::SeqCst);
                print!("{}", label);
            }
            print!("{}", chunk);
            let _ = io::stdout().flush();
        });

        (callback, streamed)
    }

    /// Whether a spinner is currently drawn
    pub fn is_spinner_active(&self) -> bool {
        self.is_spinner_active.load(Ordering::SeqCst)
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the interview conversation)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout without newline
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Banner shown once the session exists
    pub fn interview_header(&self, role: &str, company: &str, max_questions: u32) {
        println!(
            "{} {} at {} ({} questions)",
            "●".cyan(),
            role.bold(),
            company.bold(),
            max_questions
        );
        println!(
            "{}",
            "Type your answer and press Enter. Commands: /voice /status /restart /quit".dimmed()
        );
    }

    /// Label printed before a question streams in
    pub fn question_label(&self, number: u32, max_questions: u32) -> String {
        format!("{} ", format!("Q{}/{}:", number, max_questions).cyan().bold())
    }

    /// Prompt shown while waiting for a typed answer
    pub fn answer_prompt(&self) {
        self.output_inline(&format!("{} ", "You:".green().bold()));
    }

    /// Final score line
    pub fn final_score(&self, score: Option<FinalScore>) {
        match score {
            Some(score) => println!(
                "\n{} {} ({:.0}%)",
                "Final score:".bold(),
                score.to_string().cyan().bold(),
                score.percent()
            ),
            None => self.warn("The interviewer did not state a final score"),
        }
    }

    /// Render the visible conversation
    pub fn transcript(&self, turns: &[Turn]) {
        for turn in turns {
            let label = match turn.speaker() {
                Speaker::Interviewer => "Interviewer:".cyan().bold(),
                Speaker::Candidate => "You:".green().bold(),
                Speaker::System | Speaker::ControlInstruction => continue,
            };
            println!("{} {}", label, turn.text());
        }
    }

    /// Session summary for `/status`
    pub fn status(&self, view: &SessionView) {
        self.key_value("role", &view.role_title);
        self.key_value("company", &view.company_name);
        self.key_value("phase", view.phase.as_str());
        self.key_value(
            "answered",
            &format!("{}/{}", view.questions_answered, view.max_questions),
        );
        if let Some(score) = view.final_score {
            self.key_value("score", &score.to_string());
        }
    }

    /// Format recording progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        let elapsed_secs = elapsed_ms / 1000;
        let total_secs = total_ms / 1000;
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        // Build progress bar
        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>3}s / {}s",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed_secs,
            total_secs
        )
    }

    /// Show a progress bar for recording
    pub fn show_recording_progress(&mut self, message: &str) {
        self.start_spinner(message);
    }

    /// Update recording progress against the minimum answer length
    pub fn update_recording_progress(&self, elapsed_ms: u64, min_ms: u64) {
        let progress = self.format_progress(elapsed_ms, min_ms);
        let hint = if elapsed_ms >= min_ms {
            "press Enter to finish".green().to_string()
        } else {
            "keep talking".yellow().to_string()
        };
        self.update_spinner(&format!("Recording... {} {}", progress, hint));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
