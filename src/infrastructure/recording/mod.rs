//! Recording infrastructure module
//!
//! Captures answers from the microphone with cpal and packs them into the
//! upload formats the transcription providers accept.

mod cpal_recorder;
mod flac_encoder;
mod wav_encoder;

pub use cpal_recorder::CpalRecorder;
pub use flac_encoder::{
    encode_speech_flac, encode_to_flac, resample_to_16k, EncodingError, TARGET_SAMPLE_RATE,
};
pub use wav_encoder::encode_to_wav;
