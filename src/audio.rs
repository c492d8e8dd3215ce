//! Test tone output using cpal
//!
//! A constant sine tone on the default output device. Failure to open the
//! device is logged and leaves the renderer silent; it is never fatal.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
#[cfg(not(target_arch = "wasm32"))]
use cpal::{SampleRate, Stream, StreamConfig};
use macroquad::logging::{info, warn};

use crate::config::ToneConfig;
use crate::rasterizer::m_sin;

/// Sine oscillator state shared with the audio thread
#[derive(Debug, Clone)]
pub struct ToneState {
    /// Samples per wave period
    wave_period: u32,
    /// Peak amplitude in [0, 1]
    amplitude: f32,
    /// Position within the current period
    running_sample_index: u32,
}

impl ToneState {
    pub fn new(config: &ToneConfig) -> Self {
        Self {
            wave_period: (config.sample_rate / config.hz.max(1)).max(1),
            amplitude: config.volume as f32 / i16::MAX as f32,
            running_sample_index: 0,
        }
    }

    /// Fill an interleaved stereo buffer, both channels carrying the same sample
    pub fn fill(&mut self, data: &mut [f32]) {
        for frame in data.chunks_mut(2) {
            let turn = self.running_sample_index as f32 / self.wave_period as f32;
            let value = m_sin(turn) * self.amplitude;
            frame.fill(value);
            self.running_sample_index = (self.running_sample_index + 1) % self.wave_period;
        }
    }
}

/// Owns the output stream for as long as the tone should play
pub struct ToneGenerator {
    #[cfg(not(target_arch = "wasm32"))]
    _stream: Option<Stream>,
}

impl ToneGenerator {
    /// Start the tone if enabled in config
    pub fn new(config: &ToneConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let stream = if config.enabled {
            let state = Arc::new(Mutex::new(ToneState::new(config)));
            let stream = Self::init_audio_stream(state, config.sample_rate);
            match &stream {
                Some(_) => info!("Tone: {} Hz at {} Hz sample rate", config.hz, config.sample_rate),
                None => warn!("No audio output available, tone disabled"),
            }
            stream
        } else {
            None
        };

        #[cfg(target_arch = "wasm32")]
        if config.enabled {
            warn!("Tone output is not supported on this target");
        }

        Self {
            #[cfg(not(target_arch = "wasm32"))]
            _stream: stream,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn init_audio_stream(state: Arc<Mutex<ToneState>>, sample_rate: u32) -> Option<Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;

        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match state.lock() {
                    Ok(mut tone) => tone.fill(data),
                    Err(_) => data.fill(0.0),
                },
                |err| warn!("Audio stream error: {}", err),
                None,
            )
            .ok()?;

        stream.play().ok()?;
        Some(stream)
    }
}
