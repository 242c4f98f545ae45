//! Incremental WAV stream encoder.
//!
//! A [`WavStream`] reserves room for the header, appends interleaved samples
//! as generator calls arrive, and writes the header last, once the payload
//! length is known. The write cursor can be saved with
//! [`set_marker`](WavStream::set_marker) and rolled back with
//! [`goto_marker`](WavStream::goto_marker); audio written after the marker is
//! then discarded from the length accounting and overwritten by the next
//! generator call.

mod generators;
mod storage;


use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::blend::BlendMode;
use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::rng::create_rng;
use crate::wav::{WavFormat, WavHeader, HEADER_LEN, MAX_PAYLOAD_LEN};

pub use storage::Storage;

/// Which channel a volume change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSelect {
    /// First channel.
    Left,
    /// Second channel.
    Right,
    /// Every channel.
    All,
}

/// Warns when a stream is dropped without writing its header.
#[derive(Debug)]
struct HeaderGuard {
    armed: bool,
}

impl Drop for HeaderGuard {
    fn drop(&mut self) {
        if self.armed {
            warn!("stream dropped before finalize; output has no WAV header");
        }
    }
}

/// WAV encoder writing synthesized audio straight into seekable storage.
///
/// The storage is owned exclusively for the stream's lifetime.
/// [`finalize`](WavStream::finalize) consumes the stream, so a stream can be
/// finalized only once and nothing can be written after it.
#[derive(Debug)]
pub struct WavStream<S: Storage = File> {
    storage: S,
    format: WavFormat,
    volume: [f64; 2],
    blend: BlendMode,
    /// Absolute byte offset of the write cursor.
    position: u64,
    /// Absolute byte offset `goto_marker` returns to.
    marker: u64,
    /// Frames present between the header and the cursor.
    frames: u64,
    rng: Pcg32,
    guard: HeaderGuard,
}

impl WavStream<File> {
    /// Creates (or truncates) the file at `path` and opens a stream on it.
    pub fn create(path: impl AsRef<Path>, config: StreamConfig) -> StreamResult<Self> {
        let path = path.as_ref();
        // Validate before touching the filesystem.
        config.format()?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        debug!(path = %path.display(), "created output file");
        Self::new(file, config)
    }
}

impl<S: Storage> WavStream<S> {
    /// Opens a stream on arbitrary storage, overwriting from offset 0.
    pub fn new(mut storage: S, config: StreamConfig) -> StreamResult<Self> {
        let format = config.format()?;
        storage.seek(SeekFrom::Start(HEADER_LEN))?;

        debug!(
            sample_rate = format.sample_rate,
            bits = format.bits_per_sample(),
            channels = format.channels,
            seed = config.seed,
            "opened stream"
        );

        Ok(Self {
            storage,
            format,
            volume: [1.0; 2],
            blend: BlendMode::Normal,
            position: HEADER_LEN,
            marker: HEADER_LEN,
            frames: 0,
            rng: create_rng(config.seed),
            guard: HeaderGuard { armed: true },
        })
    }

    /// Format of the stream.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Frames currently counted towards the output.
    pub fn logical_len(&self) -> u64 {
        self.frames
    }

    /// Duration of the counted frames in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames as f64 / self.format.sample_rate as f64
    }

    /// Byte offset of the write cursor.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Byte offset recorded by the last [`set_marker`](Self::set_marker).
    pub fn marker(&self) -> u64 {
        self.marker
    }

    /// Active blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Per-channel volume multipliers, one entry per channel.
    pub fn volumes(&self) -> &[f64] {
        &self.volume[..self.format.channels as usize]
    }

    /// Sets the volume multiplier for subsequent generator calls.
    ///
    /// `level` is a plain multiplier (1.0 is full scale) and is not clamped;
    /// levels above 1.0 saturate loud signals. On a mono stream every
    /// selector addresses the single channel.
    pub fn set_volume(&mut self, channel: ChannelSelect, level: f64) -> StreamResult<()> {
        if !level.is_finite() {
            return Err(StreamError::invalid_param(
                "volume",
                format!("level must be finite, got {}", level),
            ));
        }

        if self.format.channels == 1 {
            self.volume[0] = level;
            return Ok(());
        }
        match channel {
            ChannelSelect::Left => self.volume[0] = level,
            ChannelSelect::Right => self.volume[1] = level,
            ChannelSelect::All => self.volume = [level; 2],
        }
        Ok(())
    }

    /// Sets how subsequent generator calls combine with audio on disk.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    /// Records the write cursor as the rewind point.
    pub fn set_marker(&mut self) {
        self.marker = self.position;
        debug!(marker = self.marker, "marker set");
    }

    /// Moves the write cursor back to the marker, discarding the frames
    /// written since.
    ///
    /// The discarded bytes stay in storage until they are overwritten or
    /// finalize truncates them.
    pub fn goto_marker(&mut self) -> StreamResult<()> {
        let block = self.format.block_align() as u64;
        let discarded = self.position.saturating_sub(self.marker) / block;

        self.storage.seek(SeekFrom::Start(self.marker))?;
        self.position = self.marker;
        self.frames = self.frames.saturating_sub(discarded);

        debug!(
            marker = self.marker,
            discarded_frames = discarded,
            "rewound to marker"
        );
        Ok(())
    }

    /// Writes the header and returns the storage.
    ///
    /// Bytes beyond the cursor (left behind by a rewind) are cut off, and a
    /// pad byte follows an odd-length payload as RIFF requires.
    pub fn finalize(mut self) -> StreamResult<S> {
        let data_len = self.frames * self.format.block_align() as u64;
        if data_len > MAX_PAYLOAD_LEN {
            return Err(StreamError::TooLong { bytes: data_len });
        }
        let data_end = HEADER_LEN + data_len;
        debug_assert_eq!(data_end, self.position);

        self.storage.truncate(data_end)?;
        if data_len % 2 == 1 {
            self.storage.seek(SeekFrom::Start(data_end))?;
            self.storage.write_all(&[0])?;
        }

        let header = WavHeader::for_payload(&self.format, data_len as u32);
        self.storage.seek(SeekFrom::Start(0))?;
        header.write(&mut self.storage)?;
        self.storage.flush()?;

        debug!(
            frames = self.frames,
            data_bytes = data_len,
            "finalized stream"
        );

        self.guard.armed = false;
        let WavStream { storage, .. } = self;
        Ok(storage)
    }

    /// Fails if `extra` more payload bytes would overflow the header fields.
    fn ensure_room(&self, extra: u64) -> StreamResult<()> {
        let total = (self.position - HEADER_LEN).saturating_add(extra);
        if total > MAX_PAYLOAD_LEN {
            return Err(StreamError::TooLong { bytes: total });
        }
        Ok(())
    }

    /// Reads up to `len` bytes at the cursor and puts the cursor back.
    ///
    /// Bytes past the end of storage are absent from the result. The cursor
    /// is restored whether or not the read succeeded.
    fn peek_existing(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut existing = Vec::with_capacity(len);
        let read = (&mut self.storage)
            .take(len as u64)
            .read_to_end(&mut existing);
        let restore = self.storage.seek(SeekFrom::Start(self.position));
        read?;
        restore?;
        Ok(existing)
    }

    /// Appends an encoded span and advances the counters.
    fn commit_span(&mut self, bytes: &[u8], frames: u64) -> StreamResult<()> {
        self.storage.write_all(bytes)?;
        self.position += bytes.len() as u64;
        self.frames += frames;
        Ok(())
    }
}
