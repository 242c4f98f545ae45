//! WAV container definitions.
//!
//! The stream encoder writes the payload first and the 44-byte header last,
//! so this module only describes the format and the header layout; it never
//! buffers audio.

mod format;
mod header;
mod pcm;

#[cfg(test)]
mod tests;

pub use format::{BitDepth, SampleFormat, WavFormat};
pub use header::{WavHeader, HEADER_LEN, MAX_PAYLOAD_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
