//! Transcription domain module

mod audio_data;
mod pcm_audio;

pub use audio_data::{AudioData, AudioMimeType};
pub use pcm_audio::PcmAudio;
