//! Raw captured audio

use crate::domain::recording::Duration;

/// Interleaved signed 16-bit PCM as captured from the microphone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl PcmAudio {
    /// `channels` of zero is treated as mono.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels: channels.max(1),
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (one sample per channel)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Playback length of the captured audio
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::from_millis(0);
        }
        let ms = self.frames() as u64 * 1000 / self.sample_rate as u64;
        Duration::from_millis(ms)
    }

    /// Average all channels down to a single one
    pub fn to_mono(&self) -> Vec<i16> {
        if self.channels == 1 {
            return self.samples.clone();
        }

        self.samples
            .chunks(self.channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_frames() {
        let audio = PcmAudio::new(vec![0; 16_000 * 12], 16_000, 1);
        assert_eq!(audio.duration().as_secs(), 12);

        let stereo = PcmAudio::new(vec![0; 48_000 * 2 * 31], 48_000, 2);
        assert_eq!(stereo.duration().as_secs(), 31);
    }

    #[test]
    fn zero_sample_rate_has_zero_duration() {
        let audio = PcmAudio::new(vec![1, 2, 3], 0, 1);
        assert_eq!(audio.duration().as_millis(), 0);
    }

    #[test]
    fn to_mono_averages_frames() {
        let audio = PcmAudio::new(vec![100, 200, 300, 400], 16_000, 2);
        assert_eq!(audio.to_mono(), vec![150, 350]);
    }

    #[test]
    fn zero_channels_is_mono() {
        let audio = PcmAudio::new(vec![1, 2], 16_000, 0);
        assert_eq!(audio.channels(), 1);
        assert_eq!(audio.frames(), 2);
    }
}
