//! WAV encoder for the OpenAI transcription endpoint
//!
//! The upload keeps the capture's own rate and channel layout; Whisper
//! resamples server-side.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::flac_encoder::EncodingError;
use crate::domain::transcription::{AudioData, AudioMimeType, PcmAudio};

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: u16 = 16;

/// Pack captured PCM into an in-memory WAV file
pub fn encode_to_wav(audio: &PcmAudio) -> Result<AudioData, EncodingError> {
    if audio.is_empty() {
        return Err(EncodingError::Empty);
    }

    let spec = WavSpec {
        channels: audio.channels(),
        sample_rate: audio.sample_rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + audio.samples().len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| EncodingError::Write(format!("Failed to create WAV writer: {}", e)))?;
        for &sample in audio.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| EncodingError::Write(format!("Failed to write sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| EncodingError::Write(format!("Failed to finalize WAV: {}", e)))?;
    }

    Ok(AudioData::new(cursor.into_inner(), AudioMimeType::Wav))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_has_riff_header_and_pcm_payload() {
        let audio = PcmAudio::new(vec![0i16; 16_000], 16_000, 1);
        let wav = encode_to_wav(&audio).unwrap();

        assert_eq!(wav.mime_type(), AudioMimeType::Wav);
        assert_eq!(&wav.data()[0..4], b"RIFF");
        assert_eq!(&wav.data()[8..12], b"WAVE");
        assert_eq!(wav.size_bytes(), 44 + 16_000 * 2);
    }

    #[test]
    fn wav_round_trips_through_reader() {
        let audio = PcmAudio::new(vec![1, -1, 2, -2], 44_100, 2);
        let wav = encode_to_wav(&audio).unwrap();

        let reader = hound::WavReader::new(Cursor::new(wav.into_data())).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().sample_rate, 44_100);
    }

    #[test]
    fn empty_capture_is_rejected() {
        let audio = PcmAudio::new(Vec::new(), 16_000, 1);
        assert!(matches!(encode_to_wav(&audio), Err(EncodingError::Empty)));
    }
}
