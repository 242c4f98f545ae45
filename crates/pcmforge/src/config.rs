//! Stream configuration.

use serde::{Deserialize, Serialize};

use crate::error::StreamResult;
use crate::wav::WavFormat;

/// Parameters fixed for the lifetime of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    /// Frames per second.
    pub sample_rate: u32,
    /// Bits per sample, 8 or 16.
    pub bit_depth: u16,
    /// Channel count, 1 or 2.
    pub channels: u16,
    /// Seed for the noise generator.
    #[serde(default)]
    pub seed: u32,
}

impl StreamConfig {
    /// Creates a configuration with seed 0.
    pub fn new(sample_rate: u32, bit_depth: u16, channels: u16) -> Self {
        Self {
            sample_rate,
            bit_depth,
            channels,
            seed: 0,
        }
    }

    /// Mono configuration.
    pub fn mono(sample_rate: u32, bit_depth: u16) -> Self {
        Self::new(sample_rate, bit_depth, 1)
    }

    /// Stereo configuration.
    pub fn stereo(sample_rate: u32, bit_depth: u16) -> Self {
        Self::new(sample_rate, bit_depth, 2)
    }

    /// Sets the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration and returns the resulting WAV format.
    pub fn format(&self) -> StreamResult<WavFormat> {
        WavFormat::new(self.sample_rate, self.bit_depth, self.channels)
    }
}
