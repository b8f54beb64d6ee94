//! Microphone recorder using cpal
//!
//! The input callback mixes each buffer to mono and pushes it into an
//! unbounded channel. Nothing consumes the channel while recording; `stop`
//! drains it in one go. Memory therefore grows linearly with answer length.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{debug, warn};

use super::flac_encoder::TARGET_SAMPLE_RATE;
use crate::application::ports::{AnswerRecorder, RecordingError};
use crate::domain::transcription::PcmAudio;

type FrameReceiver = mpsc::UnboundedReceiver<Vec<i16>>;
type FrameSender = mpsc::UnboundedSender<Vec<i16>>;

/// Answer recorder backed by the default input device
///
/// cpal::Stream is not Send, so the stream lives on its own thread and is
/// dropped there once `is_recording` goes false.
pub struct CpalRecorder {
    /// Consumer end of the frame queue for the current recording
    frames: StdMutex<Option<FrameReceiver>>,
    /// Device sample rate of the current recording
    sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
    started_at: StdMutex<Option<Instant>>,
}

impl CpalRecorder {
    pub fn new() -> Self {
        Self {
            frames: StdMutex::new(None),
            sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            started_at: StdMutex::new(None),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an i16 or f32 input config, preferring mono and 16kHz
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && config.max_sample_rate().0 >= TARGET_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > TARGET_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Average interleaved channels down to mono
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / chunk.len() as i32) as i16
            })
            .collect()
    }

    fn f32_to_i16(sample: f32) -> i16 {
        (sample.clamp(-1.0, 1.0) * 32767.0) as i16
    }

    /// Open the device and start streaming frames into `tx`.
    /// Returns the stream and its sample rate.
    fn open_stream(
        tx: FrameSender,
        is_recording: Arc<AtomicBool>,
    ) -> Result<(cpal::Stream, u32), RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device)?;
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        let on_error = |err: cpal::StreamError| warn!(error = %err, "audio stream error");

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        // A closed receiver only means the answer was cancelled
                        let _ = tx.send(Self::mix_to_mono(data, channels));
                    }
                },
                on_error,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if is_recording.load(Ordering::SeqCst) {
                        let i16_data: Vec<i16> = data.iter().map(|&s| Self::f32_to_i16(s)).collect();
                        let _ = tx.send(Self::mix_to_mono(&i16_data, channels));
                    }
                },
                on_error,
                None,
            ),
            _ => {
                return Err(RecordingError::StartFailed(
                    "Unsupported sample format".into(),
                ))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        Ok((stream, sample_rate))
    }

    fn take_receiver(&self) -> Option<FrameReceiver> {
        self.frames.lock().ok().and_then(|mut slot| slot.take())
    }

    /// Signal the capture thread to drop its stream, then give it a moment
    async fn halt_stream(&self) {
        self.is_recording.store(false, Ordering::SeqCst);
        sleep(TokioDuration::from_millis(100)).await;
        if let Ok(mut started) = self.started_at.lock() {
            *started = None;
        }
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerRecorder for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::AlreadyRecording);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        self.is_recording.store(true, Ordering::SeqCst);
        let is_recording = Arc::clone(&self.is_recording);

        std::thread::spawn(move || {
            let stream = match Self::open_stream(tx, Arc::clone(&is_recording)) {
                Ok((stream, rate)) => {
                    let _ = ready_tx.send(Ok(rate));
                    stream
                }
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            while is_recording.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            drop(stream);
        });

        let rate = match ready_rx.await {
            Ok(result) => result?,
            Err(_) => {
                self.is_recording.store(false, Ordering::SeqCst);
                return Err(RecordingError::StartFailed(
                    "Capture thread exited before starting".into(),
                ));
            }
        };

        self.sample_rate.store(rate, Ordering::SeqCst);
        if let Ok(mut slot) = self.frames.lock() {
            *slot = Some(rx);
        }
        if let Ok(mut started) = self.started_at.lock() {
            *started = Some(Instant::now());
        }
        debug!(sample_rate = rate, "recording started");
        Ok(())
    }

    async fn stop(&self) -> Result<PcmAudio, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::NotRecording);
        }

        self.halt_stream().await;

        let mut rx = self.take_receiver().ok_or(RecordingError::NotRecording)?;
        let mut samples = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            samples.extend_from_slice(&frame);
        }

        let sample_rate = self.sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::RecordingFailed("Sample rate not set".into()));
        }

        let audio = PcmAudio::new(samples, sample_rate, 1);
        debug!(duration = %audio.duration(), "recording stopped");
        Ok(audio)
    }

    async fn cancel(&self) -> Result<(), RecordingError> {
        self.halt_stream().await;
        drop(self.take_receiver());
        debug!("recording cancelled");
        Ok(())
    }

    fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn elapsed_ms(&self) -> u64 {
        self.started_at
            .lock()
            .ok()
            .and_then(|started| started.map(|at| at.elapsed().as_millis() as u64))
            .unwrap_or(0)
    }
}
