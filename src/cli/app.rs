//! Interactive interview runner

use std::env;
use std::process::ExitCode;

use tracing::{debug, warn};

use crate::application::ports::{
    AnswerRecorder, ConfigStore, RecordingError, Responder, Transcriber,
};
use crate::application::{AdvanceOutcome, InterviewController, InterviewError};
use crate::domain::config::{AppConfig, Provider};
use crate::domain::interview::{InterviewSettings, Phase, SessionError};
use crate::domain::recording::Duration;
use crate::domain::transcription::PcmAudio;
use crate::infrastructure::{
    CpalRecorder, GeminiResponder, GeminiTranscriber, OpenAiResponder, OpenAiTranscriber,
    XdgConfigStore,
};

use super::input::{LineReader, SessionCommand, SESSION_HELP};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured provider
pub const PROVIDER_ENV: &str = "MOCK_INTERVIEWER_PROVIDER";

/// Resolved options for one interactive run
#[derive(Clone)]
pub struct InterviewOptions {
    pub role: Option<String>,
    pub company: Option<String>,
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub settings: InterviewSettings,
    pub voice: bool,
    pub request_timeout: Duration,
}

type DynController = InterviewController<Box<dyn Responder>, Box<dyn Transcriber>>;

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        warn!(error = %e, path = %store.path().display(), "ignoring unreadable config file");
        AppConfig::empty()
    });

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Settings taken from the environment
pub fn env_config() -> AppConfig {
    let non_empty = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());
    AppConfig {
        provider: non_empty(PROVIDER_ENV),
        gemini_api_key: non_empty(Provider::Gemini.api_key_env()),
        openai_api_key: non_empty(Provider::OpenAi.api_key_env()),
        ..Default::default()
    }
}

/// Credential for `provider`, or a message telling the user where to put it
pub fn resolve_api_key(config: &AppConfig, provider: Provider) -> Result<String, String> {
    config
        .api_key_for(provider)
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "Missing API key for {}. Set {} environment variable or run 'mock-interviewer config set {} <key>'",
                provider,
                provider.api_key_env(),
                provider.api_key_config_key()
            )
        })
}

/// Adapters for the selected provider
pub fn build_adapters(options: &InterviewOptions) -> (Box<dyn Responder>, Box<dyn Transcriber>) {
    let timeout = options.request_timeout;
    match options.provider {
        Provider::Gemini => (
            Box::new(GeminiResponder::new(&options.api_key, &options.model).with_timeout(timeout)),
            Box::new(GeminiTranscriber::new(&options.api_key).with_timeout(timeout)),
        ),
        Provider::OpenAi => (
            Box::new(OpenAiResponder::new(&options.api_key, &options.model).with_timeout(timeout)),
            Box::new(OpenAiTranscriber::new(&options.api_key).with_timeout(timeout)),
        ),
    }
}

/// Run the interactive interview until the candidate quits
pub async fn run_interview(options: InterviewOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let (responder, transcriber) = build_adapters(&options);
    let controller = InterviewController::new(responder, transcriber, options.settings);
    let recorder = CpalRecorder::new();
    let mut reader = LineReader::new();

    debug!(
        provider = %options.provider,
        model = %options.model,
        timeout = %options.request_timeout,
        "interview configured"
    );

    let mut session = InteractiveSession {
        controller: &controller,
        recorder: &recorder,
        reader: &mut reader,
        presenter: &mut presenter,
        options: &options,
    };

    match session.run().await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// What the loop should do after handling one step
enum Flow {
    Continue,
    Quit,
}

struct InteractiveSession<'a> {
    controller: &'a DynController,
    recorder: &'a CpalRecorder,
    reader: &'a mut LineReader,
    presenter: &'a mut Presenter,
    options: &'a InterviewOptions,
}

impl InteractiveSession<'_> {
    async fn run(&mut self) -> Result<(), String> {
        loop {
            let flow = match self.controller.phase().await {
                None => self.begin().await?,
                Some(Phase::AwaitingQuestion | Phase::Scoring) => self.advance().await?,
                Some(Phase::AwaitingAnswer) => self.answer().await?,
                Some(Phase::Complete) => self.after_completion().await?,
            };
            if let Flow::Quit = flow {
                self.presenter.info("Goodbye!");
                return Ok(());
            }
        }
    }

    /// Collect role and company, then create the session
    async fn begin(&mut self) -> Result<Flow, String> {
        let Some(role) = self.ask_detail(self.options.role.clone(), "Target role: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(company) = self
            .ask_detail(self.options.company.clone(), "Target company: ")
            .await?
        else {
            return Ok(Flow::Quit);
        };

        match self.controller.start(&role, &company).await {
            Ok(_) => {
                if let Some(view) = self.controller.snapshot().await {
                    self.presenter.interview_header(
                        &view.role_title,
                        &view.company_name,
                        view.max_questions,
                    );
                }
                Ok(Flow::Continue)
            }
            Err(
                e @ InterviewError::Session(SessionError::MissingRole | SessionError::MissingCompany),
            ) => {
                self.presenter.error(&e.to_string());
                Ok(Flow::Continue)
            }
            Err(e) => Err(e.to_string()),
        }
    }

    async fn ask_detail(
        &mut self,
        preset: Option<String>,
        prompt: &str,
    ) -> Result<Option<String>, String> {
        if let Some(value) = preset.filter(|v| !v.trim().is_empty()) {
            return Ok(Some(value));
        }
        let presenter = &*self.presenter;
        self.reader
            .prompt_non_empty(|| presenter.output_inline(prompt))
            .await
            .map_err(|e| format!("Failed to read input: {}", e))
    }

    /// Ask the next question or fetch the final feedback
    async fn advance(&mut self) -> Result<Flow, String> {
        let label = match self.controller.snapshot().await {
            Some(view) if view.phase == Phase::Scoring => "\nInterviewer: ".to_string(),
            Some(view) => self
                .presenter
                .question_label(view.questions_asked + 1, view.max_questions),
            None => return Ok(Flow::Continue),
        };

        self.presenter.start_spinner("Interviewer is thinking...");
        let (on_chunk, streamed) = self.presenter.streaming_callback(label.clone());
        let result = self.controller.advance(Some(on_chunk)).await;
        self.presenter.stop_spinner();

        let was_streamed = streamed.load(std::sync::atomic::Ordering::SeqCst);
        match result {
            Ok(AdvanceOutcome::AskedQuestion { question, .. }) => {
                self.finish_reply(&label, &question, was_streamed);
                Ok(Flow::Continue)
            }
            Ok(AdvanceOutcome::Scored { feedback, score }) => {
                self.finish_reply(&label, &feedback, was_streamed);
                self.presenter.final_score(score);
                self.presenter
                    .info("Interview complete. Type /restart for a new interview or /quit to leave.");
                Ok(Flow::Continue)
            }
            Ok(AdvanceOutcome::AwaitingAnswer | AdvanceOutcome::Complete) => Ok(Flow::Continue),
            Err(e) => {
                if was_streamed {
                    self.presenter.output("");
                }
                self.retry_prompt(e).await
            }
        }
    }

    fn finish_reply(&self, label: &str, text: &str, was_streamed: bool) {
        if was_streamed {
            self.presenter.output("");
        } else {
            self.presenter.output(&format!("{}{}", label, text));
        }
    }

    async fn retry_prompt(&mut self, error: InterviewError) -> Result<Flow, String> {
        self.presenter.error(&error.to_string());
        if !error.is_recoverable() {
            return Err(error.to_string());
        }
        self.presenter
            .info("Press Enter to try again, or type /quit to leave.");
        match self.read_line().await? {
            Some(line) if SessionCommand::parse(&line) == SessionCommand::Quit => Ok(Flow::Quit),
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Quit),
        }
    }

    /// Read and handle one line at the answer prompt
    async fn answer(&mut self) -> Result<Flow, String> {
        if self.options.voice {
            self.presenter
                .info("Press Enter to record your answer, or type it instead.");
        }
        self.presenter.answer_prompt();
        let Some(line) = self.read_line().await? else {
            return Ok(Flow::Quit);
        };

        let command = match SessionCommand::parse(&line) {
            SessionCommand::Answer(text) if text.is_empty() && self.options.voice => {
                SessionCommand::Voice
            }
            other => other,
        };

        match command {
            SessionCommand::Answer(text) => {
                match self.controller.submit_answer(&text).await {
                    Ok(outcome) => debug!(answered = outcome.questions_answered, "typed answer"),
                    Err(e) => self.presenter.warn(&e.to_string()),
                }
                Ok(Flow::Continue)
            }
            SessionCommand::Voice => self.voice_answer().await,
            other => self.session_command(other).await,
        }
    }

    /// Only commands are accepted once the interview is over
    async fn after_completion(&mut self) -> Result<Flow, String> {
        self.presenter.output_inline("> ");
        let Some(line) = self.read_line().await? else {
            return Ok(Flow::Quit);
        };
        match SessionCommand::parse(&line) {
            SessionCommand::Answer(_) | SessionCommand::Voice => {
                self.presenter
                    .info("The interview is over. Type /restart or /quit.");
                Ok(Flow::Continue)
            }
            other => self.session_command(other).await,
        }
    }

    async fn session_command(&mut self, command: SessionCommand) -> Result<Flow, String> {
        match command {
            SessionCommand::Quit => return Ok(Flow::Quit),
            SessionCommand::Restart => {
                self.controller.restart().await;
                self.presenter.success("Interview discarded. Starting over.");
            }
            SessionCommand::Status => {
                if let Some(view) = self.controller.snapshot().await {
                    self.presenter.status(&view);
                }
            }
            SessionCommand::Help => self.presenter.output(SESSION_HELP),
            SessionCommand::Unknown(input) => {
                self.presenter
                    .warn(&format!("Unknown command '{}'. Type /help for commands.", input));
            }
            SessionCommand::Answer(_) | SessionCommand::Voice => {}
        }
        Ok(Flow::Continue)
    }

    /// Record, transcribe and submit a spoken answer
    async fn voice_answer(&mut self) -> Result<Flow, String> {
        let audio = match self.record().await {
            Ok(Some(audio)) => audio,
            Ok(None) => {
                self.presenter.info("Recording cancelled.");
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.presenter.stop_spinner();
                self.presenter.error(&e.to_string());
                self.presenter.info("You can type your answer instead.");
                return Ok(Flow::Continue);
            }
        };

        self.presenter.start_spinner("Transcribing...");
        match self.controller.submit_voice_answer(&audio).await {
            Ok(outcome) => {
                self.presenter.spinner_success("Transcribed");
                self.presenter.output(&format!("You: {}", outcome.text));
            }
            Err(e) => {
                self.presenter.spinner_fail(&e.to_string());
            }
        }
        Ok(Flow::Continue)
    }

    /// Capture until Enter; `None` if the candidate cancelled with Ctrl-C or EOF
    async fn record(&mut self) -> Result<Option<PcmAudio>, RecordingError> {
        let min_ms = self.options.settings.min_answer_duration.as_millis();
        self.recorder.start().await?;
        self.presenter.show_recording_progress("Recording...");

        let mut ticker = tokio::time::interval(std::time::Duration::from_millis(250));
        let line = loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.presenter
                        .update_recording_progress(self.recorder.elapsed_ms(), min_ms);
                }
                line = self.reader.next_line() => break line,
            }
        };

        match line {
            Ok(Some(_)) => {
                let audio = self.recorder.stop().await?;
                self.presenter
                    .spinner_success(&format!("Recorded {}", audio.duration()));
                Ok(Some(audio))
            }
            Ok(None) | Err(_) => {
                self.recorder.cancel().await?;
                self.presenter.stop_spinner();
                Ok(None)
            }
        }
    }

    async fn read_line(&mut self) -> Result<Option<String>, String> {
        self.reader
            .next_line()
            .await
            .map_err(|e| format!("Failed to read input: {}", e))
    }
}
