//! Declarative scores.
//!
//! A score is a JSON document holding a [`StreamConfig`] and an ordered list
//! of operations. Rendering replays the operations against a [`WavStream`]
//! in order, so a score describes exactly the same calls a program would
//! make through the API.

use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::blend::BlendMode;
use crate::config::StreamConfig;
use crate::error::StreamResult;
use crate::stream::{ChannelSelect, Storage, WavStream};
use crate::wav::{extract_pcm_data, pcm_hash, HEADER_LEN};

/// One stream operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScoreOp {
    /// Sine tone.
    Tone {
        /// Frequency in Hz.
        frequency: f64,
        /// Duration in seconds.
        duration: f64,
    },
    /// Decaying sine note.
    Chime {
        /// Frequency in Hz.
        frequency: f64,
        /// Duration in seconds.
        duration: f64,
    },
    /// Linear frequency sweep.
    Sweep {
        /// Frequency at the start, in Hz.
        start_frequency: f64,
        /// Frequency at the end, in Hz.
        end_frequency: f64,
        /// Duration in seconds.
        duration: f64,
    },
    /// White noise.
    Noise {
        /// Duration in seconds.
        duration: f64,
    },
    /// Silence.
    Silence {
        /// Duration in seconds.
        duration: f64,
    },
    /// Volume change.
    Volume {
        /// Channel to change.
        channel: ChannelSelect,
        /// Multiplier, 1.0 is full scale.
        level: f64,
    },
    /// Blend mode change.
    Blend {
        /// New blend mode.
        mode: BlendMode,
    },
    /// Record the rewind point.
    SetMarker,
    /// Rewind to the recorded point.
    GotoMarker,
}

impl ScoreOp {
    /// Applies this operation to a stream.
    pub fn apply<S: Storage>(&self, stream: &mut WavStream<S>) -> StreamResult<()> {
        match *self {
            ScoreOp::Tone {
                frequency,
                duration,
            } => stream.add_tone(frequency, duration),
            ScoreOp::Chime {
                frequency,
                duration,
            } => stream.add_chime(frequency, duration),
            ScoreOp::Sweep {
                start_frequency,
                end_frequency,
                duration,
            } => stream.add_sweep(start_frequency, end_frequency, duration),
            ScoreOp::Noise { duration } => stream.add_noise(duration),
            ScoreOp::Silence { duration } => stream.add_silence(duration),
            ScoreOp::Volume { channel, level } => stream.set_volume(channel, level),
            ScoreOp::Blend { mode } => {
                stream.set_blend_mode(mode);
                Ok(())
            }
            ScoreOp::SetMarker => {
                stream.set_marker();
                Ok(())
            }
            ScoreOp::GotoMarker => stream.goto_marker(),
        }
    }
}

/// Stream configuration plus the operations to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Score {
    /// Stream configuration.
    pub config: StreamConfig,
    /// Operations in rendering order.
    #[serde(default)]
    pub ops: Vec<ScoreOp>,
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    /// Frames in the payload.
    pub frames: u64,
    /// Payload length in bytes.
    pub data_bytes: u64,
    /// Payload duration in seconds.
    pub duration_seconds: f64,
    /// BLAKE3 hash of the payload.
    pub pcm_hash: String,
}

impl Score {
    /// Creates an empty score.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            ops: Vec::new(),
        }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: ScoreOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Parses a score from JSON.
    pub fn from_json(json: &str) -> StreamResult<Self> {
        let score: Score = serde_json::from_str(json)?;
        score.config.format()?;
        Ok(score)
    }

    /// Serializes the score to pretty-printed JSON.
    pub fn to_json(&self) -> StreamResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replays every operation on `stream`.
    pub fn play<S: Storage>(&self, stream: &mut WavStream<S>) -> StreamResult<()> {
        for op in &self.ops {
            op.apply(stream)?;
        }
        Ok(())
    }

    /// Renders into storage and returns it finalized.
    pub fn render_to<S: Storage>(&self, storage: S) -> StreamResult<S> {
        let mut stream = WavStream::new(storage, self.config)?;
        self.play(&mut stream)?;
        stream.finalize()
    }

    /// Renders into a complete WAV file held in memory.
    pub fn render_to_vec(&self) -> StreamResult<Vec<u8>> {
        Ok(self.render_to(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Renders to a file at `path`.
    pub fn render(&self, path: impl AsRef<Path>) -> StreamResult<RenderSummary> {
        let path = path.as_ref();
        let mut stream = WavStream::create(path, self.config)?;
        self.play(&mut stream)?;

        let frames = stream.logical_len();
        let duration_seconds = stream.duration_seconds();
        stream.finalize()?;

        let wav = std::fs::read(path)?;
        let pcm = extract_pcm_data(&wav).unwrap_or(&wav[HEADER_LEN as usize..]);
        let summary = RenderSummary {
            frames,
            data_bytes: pcm.len() as u64,
            duration_seconds,
            pcm_hash: pcm_hash(pcm),
        };

        info!(
            path = %path.display(),
            frames = summary.frames,
            bytes = summary.data_bytes,
            "rendered score"
        );
        Ok(summary)
    }
}
