//! Output through the system's default audio device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};

use super::{AudioContext, AudioHost, ContextState};
use crate::error::EngineError;
use crate::{SampleClock, Signal, SoundscapeGraph};

/// Frames rendered per inner block inside the stream callback.
const BLOCK_FRAMES: usize = 512;

/// Host backed by `cpal`'s default host and output device.
#[derive(Debug, Default, Clone)]
pub struct CpalHost;

impl CpalHost {
    pub fn new() -> Self {
        Self
    }
}

impl<const SAMPLE_RATE: u32> AudioHost<SAMPLE_RATE> for CpalHost {
    type Context = CpalContext<SAMPLE_RATE>;

    fn create_context(&mut self) -> Result<Self::Context, EngineError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or_else(|| {
            EngineError::UnsupportedEnvironment("no output device available".into())
        })?;

        let default_config = device
            .default_output_config()
            .map_err(|e| EngineError::UnsupportedEnvironment(e.to_string()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!(
            "Using output device: {} ({} channel(s), {:?})",
            device_name,
            default_config.channels(),
            default_config.sample_format()
        );

        let config = StreamConfig {
            channels: default_config.channels(),
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok(CpalContext {
            device,
            config,
            sample_format: default_config.sample_format(),
            stream: None,
            state: ContextState::Suspended,
            clock: SampleClock::new(),
        })
    }
}

/// A context that owns an output stream once a graph is attached.
pub struct CpalContext<const SAMPLE_RATE: u32> {
    device: cpal::Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    stream: Option<cpal::Stream>,
    state: ContextState,
    clock: SampleClock<SAMPLE_RATE>,
}

impl<const SAMPLE_RATE: u32> CpalContext<SAMPLE_RATE> {
    fn build_stream<T>(
        &self,
        mut graph: SoundscapeGraph<SAMPLE_RATE>,
    ) -> Result<cpal::Stream, EngineError>
    where
        T: Sample + FromSample<f64> + SizedSample,
    {
        let channels = self.config.channels as usize;
        let mut block = vec![0.0; BLOCK_FRAMES];

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for chunk in data.chunks_mut(channels * BLOCK_FRAMES) {
                        let frames = chunk.len() / channels;
                        let rendered = &mut block[..frames];
                        graph.process(rendered);
                        for (frame, &sample) in chunk.chunks_mut(channels).zip(rendered.iter()) {
                            let value = T::from_sample(sample);
                            frame.fill(value);
                        }
                    }
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| EngineError::UnsupportedEnvironment(e.to_string()))
    }
}

impl<const SAMPLE_RATE: u32> AudioContext<SAMPLE_RATE> for CpalContext<SAMPLE_RATE> {
    fn state(&self) -> ContextState {
        self.state
    }

    fn clock(&self) -> &SampleClock<SAMPLE_RATE> {
        &self.clock
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if self.state == ContextState::Closed {
            return Err(EngineError::ContextClosed);
        }
        if let Some(stream) = &self.stream {
            stream
                .play()
                .map_err(|e| EngineError::UnsupportedEnvironment(e.to_string()))?;
        }
        self.state = ContextState::Running;
        Ok(())
    }

    fn attach(&mut self, graph: SoundscapeGraph<SAMPLE_RATE>) -> Result<(), EngineError> {
        if self.state == ContextState::Closed {
            return Err(EngineError::ContextClosed);
        }

        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(graph)?,
            SampleFormat::I16 => self.build_stream::<i16>(graph)?,
            SampleFormat::U16 => self.build_stream::<u16>(graph)?,
            sample_format => {
                return Err(EngineError::UnsupportedEnvironment(format!(
                    "unsupported sample format: {:?}",
                    sample_format
                )));
            }
        };

        // Some backends start streams immediately; hold it until resumed
        if self.state == ContextState::Running {
            stream
                .play()
                .map_err(|e| EngineError::UnsupportedEnvironment(e.to_string()))?;
        } else if let Err(e) = stream.pause() {
            log::debug!("Output stream cannot pause before resume: {}", e);
        }

        self.stream = Some(stream);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take()
            && let Err(e) = stream.pause()
        {
            log::debug!("Failed to pause output stream on close: {}", e);
        }
        self.state = ContextState::Closed;
    }
}
