//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::PcmAudio;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Not recording")]
    NotRecording,

    #[error("Already recording")]
    AlreadyRecording,

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Port for open-ended answer recording, stopped by the candidate
#[async_trait]
pub trait AnswerRecorder: Send + Sync {
    /// Start capturing from the default input device.
    async fn start(&self) -> Result<(), RecordingError>;

    /// Stop capturing and return everything recorded since `start`.
    async fn stop(&self) -> Result<PcmAudio, RecordingError>;

    /// Stop capturing and discard the audio.
    async fn cancel(&self) -> Result<(), RecordingError>;

    /// Check if currently recording
    fn is_recording(&self) -> bool;

    /// Get elapsed recording time in milliseconds
    fn elapsed_ms(&self) -> u64;
}
