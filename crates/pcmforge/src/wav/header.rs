//! The 44-byte RIFF/WAVE header.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::format::WavFormat;
use crate::error::{StreamError, StreamResult};

/// Size of the header in bytes; the payload starts right after it.
pub const HEADER_LEN: u64 = 44;

/// Size of the `fmt ` sub-chunk body for linear PCM.
const FMT_CHUNK_SIZE: u32 = 16;

/// Format code for linear PCM.
const FORMAT_PCM: u16 = 1;

/// Largest payload whose RIFF size still fits in 32 bits.
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64 - (HEADER_LEN - 8) - 1;

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// File size minus the 8 bytes of the RIFF chunk id and size.
    pub riff_size: u32,
    /// Size of the `fmt ` sub-chunk body.
    pub fmt_size: u32,
    /// Audio format code (1 = PCM).
    pub audio_format: u16,
    /// Channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Payload length in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Builds the header for `data_size` payload bytes in `format`.
    ///
    /// Odd-sized payloads are followed by one pad byte, which the RIFF size
    /// counts but the data size does not.
    pub fn for_payload(format: &WavFormat, data_size: u32) -> Self {
        let pad = data_size & 1;
        Self {
            riff_size: (HEADER_LEN as u32 - 8) + data_size + pad,
            fmt_size: FMT_CHUNK_SIZE,
            audio_format: FORMAT_PCM,
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate(),
            block_align: format.block_align(),
            bits_per_sample: format.bits_per_sample(),
            data_size,
        }
    }

    /// Writes the header.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // RIFF chunk
        writer.write_all(b"RIFF")?;
        writer.write_u32::<LittleEndian>(self.riff_size)?;
        writer.write_all(b"WAVE")?;

        // fmt chunk
        writer.write_all(b"fmt ")?;
        writer.write_u32::<LittleEndian>(self.fmt_size)?;
        writer.write_u16::<LittleEndian>(self.audio_format)?;
        writer.write_u16::<LittleEndian>(self.channels)?;
        writer.write_u32::<LittleEndian>(self.sample_rate)?;
        writer.write_u32::<LittleEndian>(self.byte_rate)?;
        writer.write_u16::<LittleEndian>(self.block_align)?;
        writer.write_u16::<LittleEndian>(self.bits_per_sample)?;

        // data chunk
        writer.write_all(b"data")?;
        writer.write_u32::<LittleEndian>(self.data_size)?;

        Ok(())
    }

    /// Serializes the header into its fixed 44-byte form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN as usize] {
        let mut bytes = [0u8; HEADER_LEN as usize];
        let mut cursor = &mut bytes[..];
        self.write(&mut cursor)
            .expect("header fits exactly in its fixed-size buffer");
        bytes
    }

    /// Reads a canonical 44-byte header.
    ///
    /// Only the layout this crate writes is accepted: `fmt ` immediately
    /// followed by `data`.
    pub fn read<R: Read>(reader: &mut R) -> StreamResult<Self> {
        let mut tag = [0u8; 4];

        expect_tag(reader, &mut tag, b"RIFF")?;
        let riff_size = reader.read_u32::<LittleEndian>()?;
        expect_tag(reader, &mut tag, b"WAVE")?;

        expect_tag(reader, &mut tag, b"fmt ")?;
        let fmt_size = reader.read_u32::<LittleEndian>()?;
        let audio_format = reader.read_u16::<LittleEndian>()?;
        let channels = reader.read_u16::<LittleEndian>()?;
        let sample_rate = reader.read_u32::<LittleEndian>()?;
        let byte_rate = reader.read_u32::<LittleEndian>()?;
        let block_align = reader.read_u16::<LittleEndian>()?;
        let bits_per_sample = reader.read_u16::<LittleEndian>()?;

        expect_tag(reader, &mut tag, b"data")?;
        let data_size = reader.read_u32::<LittleEndian>()?;

        Ok(Self {
            riff_size,
            fmt_size,
            audio_format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_size,
        })
    }

    /// Recovers the stream format described by this header.
    pub fn format(&self) -> StreamResult<WavFormat> {
        if self.audio_format != FORMAT_PCM {
            return Err(StreamError::malformed(format!(
                "audio format {} is not linear PCM",
                self.audio_format
            )));
        }
        let format = WavFormat::new(self.sample_rate, self.bits_per_sample, self.channels)?;
        if format.block_align() != self.block_align {
            return Err(StreamError::malformed(format!(
                "block align {} does not match {} channel(s) of {} bits",
                self.block_align,
                self.channels,
                self.bits_per_sample
            )));
        }
        Ok(format)
    }

    /// Number of frames in the payload.
    pub fn frame_count(&self) -> u64 {
        if self.block_align == 0 {
            return 0;
        }
        self.data_size as u64 / self.block_align as u64
    }
}

fn expect_tag<R: Read>(reader: &mut R, buf: &mut [u8; 4], expected: &[u8; 4]) -> StreamResult<()> {
    reader.read_exact(buf)?;
    if *buf != *expected {
        return Err(StreamError::malformed(format!(
            "expected chunk '{}', found '{}'",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&buf[..])
        )));
    }
    Ok(())
}
