//! pcmforge
//!
//! Synthesizes PCM audio and encodes it incrementally into uncompressed WAV
//! files.
//!
//! # Overview
//!
//! A [`WavStream`] owns an open file (or any seekable storage) and exposes
//! generator calls that append audio at the write cursor:
//!
//! - **Tone** - constant-frequency sine
//! - **Chime** - sine with a linear fade-out
//! - **Sweep** - phase-continuous linear frequency ramp
//! - **Noise** - uniform white noise, seeded
//! - **Silence**
//!
//! Each call quantizes to the stream's bit depth (unsigned 8-bit centered at
//! 127, or signed 16-bit), interleaves channels, and optionally blends with
//! the audio already stored at the cursor. A marker lets callers rewind and
//! re-record a section. The header is written by [`WavStream::finalize`],
//! once the final length is known.
//!
//! # Determinism
//!
//! Output is a pure function of the calls made and the configured seed. Noise
//! uses PCG32 seeded from [`StreamConfig::seed`].
//!
//! # Example
//!
//! ```no_run
//! use pcmforge::{ChannelSelect, StreamConfig, WavStream};
//!
//! let mut stream = WavStream::create("beeps.wav", StreamConfig::stereo(41000, 16))?;
//! stream.set_volume(ChannelSelect::Left, 0.0)?;
//! stream.add_tone(2000.0, 0.5)?;
//! stream.add_silence(0.5)?;
//! stream.finalize()?;
//! # Ok::<(), pcmforge::StreamError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`stream`] - The stream encoder and its generator operations
//! - [`synth`] - Unit-amplitude signal generators
//! - [`blend`] - Blend modes
//! - [`wav`] - Format descriptors and the 44-byte header
//! - [`score`] - JSON scores replayed through a stream
//! - [`mod@rangemap`] - Linear range mapping

pub mod blend;
pub mod config;
pub mod error;
pub mod rangemap;
pub mod rng;
pub mod score;
pub mod stream;
pub mod synth;
pub mod wav;

pub use blend::BlendMode;
pub use config::StreamConfig;
pub use error::{StreamError, StreamResult};
pub use rangemap::rangemap;
pub use score::{RenderSummary, Score, ScoreOp};
pub use stream::{ChannelSelect, Storage, WavStream};
pub use wav::{BitDepth, SampleFormat, WavFormat, WavHeader};
