//! Interview controller use case
//!
//! Drives one [`InterviewSession`] through its phases. Every transition runs
//! under the session lock, including the Responder or Transcriber call, so
//! concurrent callers are serialised and a failed call leaves the session
//! exactly as it was.

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::interview::{
    FinalScore, InterviewSession, InterviewSettings, PendingStep, Phase, SessionError, Turn,
};
use crate::domain::transcription::PcmAudio;

use super::ports::{ChunkCallback, Responder, ResponderError, Transcriber, TranscriptionError};

/// Errors from the interview use case
#[derive(Debug, Clone, Error)]
pub enum InterviewError {
    #[error("No interview in progress")]
    NoSession,

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Interviewer request failed: {0}")]
    Responder(#[from] ResponderError),

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}

impl InterviewError {
    /// Whether the caller can retry or re-prompt without restarting.
    ///
    /// Session creation errors and a missing session need new input first.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NoSession => false,
            Self::Session(
                SessionError::MissingRole
                | SessionError::MissingCompany
                | SessionError::NoQuestions
                | SessionError::TooManyQuestions { .. },
            ) => false,
            Self::Session(_) | Self::Responder(_) | Self::Transcription(_) => true,
        }
    }
}

/// Result of `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A session already exists and was left untouched
    AlreadyStarted,
}

/// Result of `advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The interviewer asked question `number`
    AskedQuestion { number: u32, question: String },
    /// The interviewer delivered the final feedback
    Scored {
        feedback: String,
        score: Option<FinalScore>,
    },
    /// Nothing to do until the candidate answers
    AwaitingAnswer,
    /// The interview is over; nothing changed
    Complete,
}

/// Result of a successful answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// The recorded answer text (trimmed, or transcribed for voice answers)
    pub text: String,
    pub questions_answered: u32,
    /// Phase after the answer was recorded
    pub phase: Phase,
}

/// Read-only view of the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub role_title: String,
    pub company_name: String,
    pub phase: Phase,
    pub question_number: u32,
    pub questions_asked: u32,
    pub questions_answered: u32,
    pub max_questions: u32,
    /// Candidate and Interviewer turns only
    pub turns: Vec<Turn>,
    pub final_feedback: Option<String>,
    pub final_score: Option<FinalScore>,
}

impl SessionView {
    fn of(session: &InterviewSession) -> Self {
        Self {
            role_title: session.role_title().to_string(),
            company_name: session.company_name().to_string(),
            phase: session.phase(),
            question_number: session.current_question_number(),
            questions_asked: session.questions_asked(),
            questions_answered: session.questions_answered(),
            max_questions: session.max_questions(),
            turns: session.transcript().renderable().cloned().collect(),
            final_feedback: session.final_feedback().map(str::to_string),
            final_score: session.final_score(),
        }
    }
}

/// Turn sequencer for a single candidate
pub struct InterviewController<R, T>
where
    R: Responder,
    T: Transcriber,
{
    responder: R,
    transcriber: T,
    settings: InterviewSettings,
    session: Mutex<Option<InterviewSession>>,
}

impl<R, T> InterviewController<R, T>
where
    R: Responder,
    T: Transcriber,
{
    /// Create a controller with no session
    pub fn new(responder: R, transcriber: T, settings: InterviewSettings) -> Self {
        Self {
            responder,
            transcriber,
            settings,
            session: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &InterviewSettings {
        &self.settings
    }

    /// Create the session once role and company are both known.
    pub async fn start(&self, role: &str, company: &str) -> Result<StartOutcome, InterviewError> {
        let mut guard = self.session.lock().await;
        if guard.is_some() {
            debug!("start ignored, session already exists");
            return Ok(StartOutcome::AlreadyStarted);
        }

        let session = InterviewSession::new(role, company, self.settings)?;
        info!(
            role = session.role_title(),
            company = session.company_name(),
            max_questions = session.max_questions(),
            "interview session started"
        );
        *guard = Some(session);
        Ok(StartOutcome::Started)
    }

    /// Run the next automatic transition, if there is one.
    ///
    /// `on_chunk` receives the interviewer's reply as it streams in.
    pub async fn advance(
        &self,
        on_chunk: Option<ChunkCallback>,
    ) -> Result<AdvanceOutcome, InterviewError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(InterviewError::NoSession)?;

        let step = match session.pending_step() {
            Some(step) => step,
            None => {
                return Ok(match session.phase() {
                    Phase::Complete => AdvanceOutcome::Complete,
                    _ => AdvanceOutcome::AwaitingAnswer,
                })
            }
        };

        let request = session.transcript().with_turn(step.instruction().clone());
        debug!(turns = request.len(), phase = %session.phase(), "calling responder");

        let reply = match self.responder.complete(&request, on_chunk).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, phase = %session.phase(), "responder call failed, session unchanged");
                return Err(e.into());
            }
        };

        match step {
            PendingStep::AskQuestion {
                number,
                instruction,
            } => {
                session.record_question(instruction, &reply)?;
                info!(number, "question asked");
                Ok(AdvanceOutcome::AskedQuestion {
                    number,
                    question: reply,
                })
            }
            PendingStep::Score { instruction } => {
                session.record_final_feedback(instruction, &reply)?;
                let score = session.final_score();
                info!(score = ?score, "interview complete");
                Ok(AdvanceOutcome::Scored {
                    feedback: reply,
                    score,
                })
            }
        }
    }

    /// Record a typed answer to the pending question.
    pub async fn submit_answer(&self, text: &str) -> Result<AnswerOutcome, InterviewError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(InterviewError::NoSession)?;
        Self::record_answer(session, text)
    }

    /// Record a spoken answer.
    ///
    /// Phase and minimum duration are checked before the audio is sent for
    /// transcription. A blank transcription is rejected like a blank answer.
    pub async fn submit_voice_answer(
        &self,
        audio: &PcmAudio,
    ) -> Result<AnswerOutcome, InterviewError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(InterviewError::NoSession)?;

        let recorded = audio.duration();
        if let Err(e) = session.check_voice_answer(recorded) {
            debug!(recorded = %recorded, error = %e, "voice answer rejected");
            return Err(e.into());
        }

        let text = self.transcriber.transcribe(audio).await.map_err(|e| {
            warn!(error = %e, "transcription failed, session unchanged");
            InterviewError::from(e)
        })?;
        debug!(chars = text.len(), "voice answer transcribed");

        Self::record_answer(session, &text)
    }

    /// Discard the session from any phase
    pub async fn restart(&self) {
        let mut guard = self.session.lock().await;
        if guard.take().is_some() {
            info!("interview session discarded");
        }
    }

    /// Current phase, or `None` before `start`
    pub async fn phase(&self) -> Option<Phase> {
        self.session.lock().await.as_ref().map(InterviewSession::phase)
    }

    /// Read-only view of the session, or `None` before `start`
    pub async fn snapshot(&self) -> Option<SessionView> {
        self.session.lock().await.as_ref().map(SessionView::of)
    }

    fn record_answer(
        session: &mut InterviewSession,
        text: &str,
    ) -> Result<AnswerOutcome, InterviewError> {
        session.submit_answer(text)?;
        debug!(
            answered = session.questions_answered(),
            phase = %session.phase(),
            "answer recorded"
        );
        Ok(AnswerOutcome {
            text: text.trim().to_string(),
            questions_answered: session.questions_answered(),
            phase: session.phase(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::{Speaker, Transcript};
    use crate::domain::recording::Duration;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    // Mock implementations for testing

    /// Replies from a script; records every transcript it was given
    #[derive(Default)]
    struct ScriptedResponder {
        replies: StdMutex<VecDeque<Result<String, ResponderError>>>,
        seen: StdMutex<Vec<Transcript>>,
    }

    impl ScriptedResponder {
        fn with(replies: Vec<Result<String, ResponderError>>) -> Self {
            Self {
                replies: StdMutex::new(replies.into()),
                seen: StdMutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last_request(&self) -> Transcript {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Responder for ScriptedResponder {
        async fn complete(
            &self,
            transcript: &Transcript,
            on_chunk: Option<ChunkCallback>,
        ) -> Result<String, ResponderError> {
            self.seen.lock().unwrap().push(transcript.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("Next question?".to_string()));
            if let (Ok(text), Some(cb)) = (&reply, on_chunk) {
                for word in text.split_inclusive(' ') {
                    cb(word);
                }
            }
            reply
        }
    }

    #[async_trait]
    impl Responder for Arc<ScriptedResponder> {
        async fn complete(
            &self,
            transcript: &Transcript,
            on_chunk: Option<ChunkCallback>,
        ) -> Result<String, ResponderError> {
            self.as_ref().complete(transcript, on_chunk).await
        }
    }

    struct MockTranscriber {
        text: String,
        calls: Arc<AtomicUsize>,
    }

    impl MockTranscriber {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Transcriber for MockTranscriber {
        async fn transcribe(&self, _audio: &PcmAudio) -> Result<String, TranscriptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    struct FailingTranscriber;

    #[async_trait]
    impl Transcriber for FailingTranscriber {
        async fn transcribe(&self, _audio: &PcmAudio) -> Result<String, TranscriptionError> {
            Err(TranscriptionError::RateLimited)
        }
    }

    fn settings(max_questions: u32) -> InterviewSettings {
        InterviewSettings {
            max_questions,
            ..Default::default()
        }
    }

    fn silence(secs: u32) -> PcmAudio {
        PcmAudio::new(vec![0; (secs * 16_000) as usize], 16_000, 1)
    }

    async fn started(
        responder: Arc<ScriptedResponder>,
        max_questions: u32,
    ) -> InterviewController<Arc<ScriptedResponder>, MockTranscriber> {
        let controller = InterviewController::new(
            responder,
            MockTranscriber::new("spoken answer"),
            settings(max_questions),
        );
        controller.start("Software Engineer", "Google").await.unwrap();
        controller
    }

    #[tokio::test]
    async fn happy_path_two_questions() {
        let responder = Arc::new(ScriptedResponder::with(vec![
            Ok("Q1: Tell me about binary search.".to_string()),
            Ok("Q2: How does a hash map work?".to_string()),
            Ok("Final score: 8/10\nGood job.".to_string()),
        ]));
        let controller = started(Arc::clone(&responder), 2).await;

        let outcome = controller.advance(None).await.unwrap();
        assert_eq!(
            outcome,
            AdvanceOutcome::AskedQuestion {
                number: 1,
                question: "Q1: Tell me about binary search.".to_string()
            }
        );
        assert_eq!(controller.phase().await, Some(Phase::AwaitingAnswer));

        let answer = controller.submit_answer("I used binary search.").await.unwrap();
        assert_eq!(answer.questions_answered, 1);
        assert_eq!(answer.phase, Phase::AwaitingQuestion);

        controller.advance(None).await.unwrap();
        let answer = controller.submit_answer("I used a hash map.").await.unwrap();
        assert_eq!(answer.questions_answered, 2);
        assert_eq!(answer.phase, Phase::Scoring);

        let outcome = controller.advance(None).await.unwrap();
        match outcome {
            AdvanceOutcome::Scored { feedback, score } => {
                assert!(feedback.contains("Good job."));
                assert_eq!(score.unwrap().points, 8);
            }
            other => panic!("expected Scored, got {:?}", other),
        }

        let view = controller.snapshot().await.unwrap();
        assert_eq!(view.phase, Phase::Complete);
        assert!(view.final_feedback.is_some());
        assert_eq!(view.questions_asked, 2);
        assert_eq!(responder.calls(), 3);
    }

    #[tokio::test]
    async fn responder_sees_full_transcript_with_instruction_last() {
        let responder = Arc::new(ScriptedResponder::default());
        let controller = started(Arc::clone(&responder), 2).await;

        controller.advance(None).await.unwrap();
        controller.submit_answer("answer one").await.unwrap();
        controller.advance(None).await.unwrap();

        let request = responder.last_request();
        let speakers: Vec<Speaker> = request.turns().iter().map(|t| t.speaker()).collect();
        assert_eq!(
            speakers,
            vec![
                Speaker::System,
                Speaker::ControlInstruction,
                Speaker::Interviewer,
                Speaker::Candidate,
                Speaker::ControlInstruction,
            ]
        );
        assert!(request.last().unwrap().text().contains("#2"));
    }

    #[tokio::test]
    async fn responder_failure_leaves_session_unchanged_and_retry_works() {
        let responder = Arc::new(ScriptedResponder::with(vec![
            Err(ResponderError::RequestFailed("connection reset".to_string())),
            Ok("Q1?".to_string()),
        ]));
        let controller = started(Arc::clone(&responder), 2).await;
        let before = controller.snapshot().await.unwrap();

        let err = controller.advance(None).await.unwrap_err();
        assert!(matches!(err, InterviewError::Responder(_)));
        assert!(err.is_recoverable());
        assert_eq!(controller.snapshot().await.unwrap(), before);

        let outcome = controller.advance(None).await.unwrap();
        assert!(matches!(outcome, AdvanceOutcome::AskedQuestion { number: 1, .. }));
        assert_eq!(controller.snapshot().await.unwrap().questions_asked, 1);
    }

    #[tokio::test]
    async fn scoring_failure_keeps_scoring_phase() {
        let responder = Arc::new(ScriptedResponder::with(vec![
            Ok("Q1?".to_string()),
            Err(ResponderError::RateLimited),
            Ok("Final score: 4/5".to_string()),
        ]));
        let controller = started(Arc::clone(&responder), 1).await;

        controller.advance(None).await.unwrap();
        controller.submit_answer("answer").await.unwrap();
        assert!(controller.advance(None).await.is_err());

        let view = controller.snapshot().await.unwrap();
        assert_eq!(view.phase, Phase::Scoring);
        assert!(view.final_feedback.is_none());

        controller.advance(None).await.unwrap();
        assert_eq!(controller.phase().await, Some(Phase::Complete));
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let responder = Arc::new(ScriptedResponder::default());
        let controller = started(Arc::clone(&responder), 1).await;

        controller.advance(None).await.unwrap();
        controller.submit_answer("answer").await.unwrap();
        controller.advance(None).await.unwrap();
        let done = controller.snapshot().await.unwrap();
        let calls = responder.calls();

        for _ in 0..3 {
            assert_eq!(controller.advance(None).await.unwrap(), AdvanceOutcome::Complete);
        }
        assert_eq!(controller.snapshot().await.unwrap(), done);
        assert_eq!(responder.calls(), calls);

        let err = controller.submit_answer("late answer").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::WrongPhase { .. })
        ));
    }

    #[tokio::test]
    async fn advance_while_awaiting_answer_is_noop() {
        let responder = Arc::new(ScriptedResponder::default());
        let controller = started(Arc::clone(&responder), 2).await;

        controller.advance(None).await.unwrap();
        let outcome = controller.advance(None).await.unwrap();
        assert_eq!(outcome, AdvanceOutcome::AwaitingAnswer);
        assert_eq!(responder.calls(), 1);
    }

    #[tokio::test]
    async fn empty_and_early_answers_are_rejected_without_mutation() {
        let responder = Arc::new(ScriptedResponder::default());
        let controller = started(Arc::clone(&responder), 2).await;

        let err = controller.submit_answer("too early").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::WrongPhase { .. })
        ));

        controller.advance(None).await.unwrap();
        let before = controller.snapshot().await.unwrap();
        let err = controller.submit_answer("   \n").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::EmptyAnswer)
        ));
        assert_eq!(controller.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn short_voice_answer_rejected_before_transcription() {
        let responder = Arc::new(ScriptedResponder::default());
        let transcriber = MockTranscriber::new("should not be used");
        let calls = Arc::clone(&transcriber.calls);
        let controller = InterviewController::new(responder, transcriber, settings(2));
        controller.start("Backend Engineer", "Amazon").await.unwrap();
        controller.advance(None).await.unwrap();

        let err = controller.submit_voice_answer(&silence(12)).await.unwrap_err();
        match err {
            InterviewError::Session(SessionError::AnswerTooShort { recorded, minimum }) => {
                assert_eq!(recorded, Duration::from_secs(12));
                assert_eq!(minimum, Duration::from_secs(30));
            }
            other => panic!("expected AnswerTooShort, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let view = controller.snapshot().await.unwrap();
        assert_eq!(view.phase, Phase::AwaitingAnswer);
        assert_eq!(view.questions_answered, 0);
    }

    #[tokio::test]
    async fn voice_answer_is_recorded_as_candidate_text() {
        let responder = Arc::new(ScriptedResponder::default());
        let controller = started(Arc::clone(&responder), 2).await;
        controller.advance(None).await.unwrap();

        let outcome = controller.submit_voice_answer(&silence(31)).await.unwrap();
        assert_eq!(outcome.text, "spoken answer");
        assert_eq!(outcome.questions_answered, 1);

        let view = controller.snapshot().await.unwrap();
        let last = view.turns.last().unwrap();
        assert_eq!(last.speaker(), Speaker::Candidate);
        assert_eq!(last.text(), "spoken answer");
    }

    #[tokio::test]
    async fn voice_answer_in_wrong_phase_skips_transcription() {
        let transcriber = MockTranscriber::new("text");
        let calls = Arc::clone(&transcriber.calls);
        let controller =
            InterviewController::new(Arc::new(ScriptedResponder::default()), transcriber, settings(1));
        controller.start("SRE", "Netflix").await.unwrap();

        let err = controller.submit_voice_answer(&silence(40)).await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::WrongPhase { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_transcription_is_rejected() {
        let controller = InterviewController::new(
            Arc::new(ScriptedResponder::default()),
            MockTranscriber::new("  "),
            settings(1),
        );
        controller.start("SRE", "Netflix").await.unwrap();
        controller.advance(None).await.unwrap();

        let err = controller.submit_voice_answer(&silence(40)).await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::EmptyAnswer)
        ));
        assert_eq!(controller.phase().await, Some(Phase::AwaitingAnswer));
    }

    #[tokio::test]
    async fn transcription_failure_is_recoverable() {
        let controller = InterviewController::new(
            Arc::new(ScriptedResponder::default()),
            FailingTranscriber,
            settings(1),
        );
        controller.start("SRE", "Netflix").await.unwrap();
        controller.advance(None).await.unwrap();

        let err = controller.submit_voice_answer(&silence(40)).await.unwrap_err();
        assert!(matches!(err, InterviewError::Transcription(_)));
        assert!(err.is_recoverable());
        assert_eq!(controller.snapshot().await.unwrap().questions_answered, 0);
    }

    #[tokio::test]
    async fn start_requires_role_and_company() {
        let controller = InterviewController::new(
            Arc::new(ScriptedResponder::default()),
            MockTranscriber::new(""),
            settings(5),
        );

        let err = controller.start("  ", "Google").await.unwrap_err();
        assert!(matches!(err, InterviewError::Session(SessionError::MissingRole)));
        assert!(!err.is_recoverable());

        let err = controller.start("Engineer", "").await.unwrap_err();
        assert!(matches!(
            err,
            InterviewError::Session(SessionError::MissingCompany)
        ));
        assert!(controller.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn start_twice_keeps_existing_session() {
        let controller = started(Arc::new(ScriptedResponder::default()), 2).await;
        controller.advance(None).await.unwrap();

        let outcome = controller.start("Other Role", "Apple").await.unwrap();
        assert_eq!(outcome, StartOutcome::AlreadyStarted);

        let view = controller.snapshot().await.unwrap();
        assert_eq!(view.role_title, "Software Engineer");
        assert_eq!(view.questions_asked, 1);
    }

    #[tokio::test]
    async fn operations_without_session_fail() {
        let controller = InterviewController::new(
            Arc::new(ScriptedResponder::default()),
            MockTranscriber::new(""),
            settings(5),
        );
        assert!(matches!(
            controller.advance(None).await,
            Err(InterviewError::NoSession)
        ));
        assert!(matches!(
            controller.submit_answer("hi").await,
            Err(InterviewError::NoSession)
        ));
        assert!(controller.phase().await.is_none());
    }

    #[tokio::test]
    async fn restart_discards_session_from_any_phase() {
        let controller = started(Arc::new(ScriptedResponder::default()), 2).await;
        controller.advance(None).await.unwrap();

        controller.restart().await;
        assert!(controller.snapshot().await.is_none());

        // Safe with no session too
        controller.restart().await;

        assert_eq!(
            controller.start("Data Engineer", "Meta").await.unwrap(),
            StartOutcome::Started
        );
        assert_eq!(controller.phase().await, Some(Phase::AwaitingQuestion));
    }

    #[tokio::test]
    async fn streamed_chunks_concatenate_to_reply() {
        let responder = Arc::new(ScriptedResponder::with(vec![Ok(
            "Describe a system you designed.".to_string(),
        )]));
        let controller = started(Arc::clone(&responder), 1).await;

        let collected = Arc::new(StdMutex::new(String::new()));
        let sink = Arc::clone(&collected);
        let on_chunk: ChunkCallback = Arc::new(move |chunk: &str| {
            sink.lock().unwrap().push_str(chunk);
        });

        controller.advance(Some(on_chunk)).await.unwrap();
        assert_eq!(
            collected.lock().unwrap().as_str(),
            "Describe a system you designed."
        );
    }

    #[tokio::test]
    async fn renderable_turns_hide_control_instructions() {
        let controller = started(Arc::new(ScriptedResponder::default()), 2).await;
        controller.advance(None).await.unwrap();
        controller.submit_answer("answer").await.unwrap();

        let view = controller.snapshot().await.unwrap();
        assert!(view.turns.iter().all(|t| t.speaker().is_renderable()));
        assert_eq!(view.turns.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_submissions_are_serialised() {
        let controller = Arc::new(started(Arc::new(ScriptedResponder::default()), 2).await);
        controller.advance(None).await.unwrap();

        let a = {
            let c = Arc::clone(&controller);
            tokio::spawn(async move { c.submit_answer("first").await })
        };
        let b = {
            let c = Arc::clone(&controller);
            tokio::spawn(async move { c.submit_answer("second").await })
        };
        let results = [a.await.unwrap(), b.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let view = controller.snapshot().await.unwrap();
        assert_eq!(view.questions_answered, 1);
        assert_eq!(view.questions_asked, 1);
        assert_eq!(view.phase, Phase::AwaitingQuestion);
    }
}
