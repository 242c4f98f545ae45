//! WAV format parameters and per-bit-depth sample quantization.

use crate::error::{StreamError, StreamResult};

/// Bits used to store one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// Unsigned 8-bit samples centered at 127.
    Eight,
    /// Signed 16-bit little-endian samples centered at 0.
    Sixteen,
}

impl BitDepth {
    /// Parses a bit count, accepting only 8 and 16.
    pub fn from_bits(bits: u16) -> StreamResult<Self> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(StreamError::UnsupportedBitDepth { bits: other }),
        }
    }

    /// Number of bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    /// Number of bytes per sample.
    pub fn bytes(self) -> u16 {
        self.bits() / 8
    }

    /// Quantization descriptor for this depth.
    pub fn sample_format(self) -> SampleFormat {
        match self {
            BitDepth::Eight => SampleFormat::U8,
            BitDepth::Sixteen => SampleFormat::S16,
        }
    }
}

/// How a unit amplitude becomes stored bytes.
///
/// One descriptor drives every generator, so the synthesis code never
/// branches on bit depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFormat {
    /// Multiplier applied to a unit amplitude.
    pub scale: f64,
    /// Value representing silence.
    pub offset: f64,
    /// Bytes per stored sample.
    pub width: usize,
    /// Whether stored samples are two's-complement.
    pub signed: bool,
}

impl SampleFormat {
    /// Unsigned 8-bit, silence at 127.
    pub const U8: SampleFormat = SampleFormat {
        scale: 127.0,
        offset: 127.0,
        width: 1,
        signed: false,
    };

    /// Signed 16-bit little-endian, silence at 0.
    pub const S16: SampleFormat = SampleFormat {
        scale: 32767.0,
        offset: 0.0,
        width: 2,
        signed: true,
    };

    /// Smallest storable value.
    pub fn min_value(&self) -> i32 {
        if self.signed {
            -(1 << (self.width * 8 - 1))
        } else {
            0
        }
    }

    /// Largest storable value.
    pub fn max_value(&self) -> i32 {
        if self.signed {
            (1 << (self.width * 8 - 1)) - 1
        } else {
            (1 << (self.width * 8)) - 1
        }
    }

    /// Stored value of silence.
    pub fn neutral(&self) -> i32 {
        self.offset as i32
    }

    /// Rounds a stored-domain value and saturates it to the sample range.
    pub fn saturate(&self, raw: f64) -> i32 {
        let rounded = raw.round();
        if rounded.is_nan() {
            return self.neutral();
        }
        rounded.clamp(self.min_value() as f64, self.max_value() as f64) as i32
    }

    /// Converts an amplitude (unit signal already scaled by volume and
    /// envelope) into a stored sample value.
    ///
    /// Amplitudes beyond `[-1, 1]` saturate rather than wrap.
    pub fn quantize(&self, amplitude: f64) -> i32 {
        self.saturate(amplitude * self.scale + self.offset)
    }

    /// Appends the little-endian encoding of `value` to `out`.
    pub fn encode(&self, value: i32, out: &mut Vec<u8>) {
        match self.width {
            1 => out.push(value as u8),
            _ => out.extend_from_slice(&(value as i16).to_le_bytes()),
        }
    }

    /// Decodes one sample from the first `width` bytes of `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> i32 {
        match self.width {
            1 => bytes[0] as i32,
            _ => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
        }
    }
}

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Storage depth of each sample.
    pub bit_depth: BitDepth,
}

impl WavFormat {
    /// Creates a validated format.
    pub fn new(sample_rate: u32, bits: u16, channels: u16) -> StreamResult<Self> {
        if sample_rate == 0 {
            return Err(StreamError::InvalidSampleRate { rate: sample_rate });
        }
        if !(1..=2).contains(&channels) {
            return Err(StreamError::UnsupportedChannelCount { channels });
        }
        let bit_depth = BitDepth::from_bits(bits)?;
        // The byte rate has to fit its 32-bit header field.
        let block_align = channels as u32 * bit_depth.bytes() as u32;
        if sample_rate.checked_mul(block_align).is_none() {
            return Err(StreamError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            channels,
            sample_rate,
            bit_depth,
        })
    }

    /// Creates a mono format.
    pub fn mono(sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bit_depth,
        }
    }

    /// Creates a stereo format.
    pub fn stereo(sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self {
            channels: 2,
            sample_rate,
            bit_depth,
        }
    }

    /// Bits per sample as stored in the header.
    pub fn bits_per_sample(&self) -> u16 {
        self.bit_depth.bits()
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bit_depth.bytes()
    }

    /// Bytes per frame (one sample for every channel).
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Quantization descriptor for this format.
    pub fn sample_format(&self) -> SampleFormat {
        self.bit_depth.sample_format()
    }

    /// Number of frames covering `duration` seconds, rounded to the nearest
    /// frame.
    pub fn frames_for(&self, duration: f64) -> u64 {
        (self.sample_rate as f64 * duration).round() as u64
    }
}
