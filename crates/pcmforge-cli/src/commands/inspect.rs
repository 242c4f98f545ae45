//! Inspect command implementation
//!
//! Prints the header fields and PCM hash of a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmforge::wav::compute_pcm_hash;
use pcmforge::WavHeader;
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use super::JsonError;

/// Machine-readable inspection result.
#[derive(Debug, Serialize)]
struct InspectOutput {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<HeaderJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pcm_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
struct HeaderJson {
    riff_size: u32,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    data_size: u32,
    frames: u64,
    duration_seconds: f64,
}

impl From<&WavHeader> for HeaderJson {
    fn from(h: &WavHeader) -> Self {
        let frames = h.frame_count();
        Self {
            riff_size: h.riff_size,
            channels: h.channels,
            sample_rate: h.sample_rate,
            byte_rate: h.byte_rate,
            block_align: h.block_align,
            bits_per_sample: h.bits_per_sample,
            data_size: h.data_size,
            frames,
            duration_seconds: if h.sample_rate == 0 {
                0.0
            } else {
                frames as f64 / h.sample_rate as f64
            },
        }
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if the header is a valid PCM header, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read WAV file: {}", input))?;

    let parsed = WavHeader::read(&mut &bytes[..]).and_then(|h| h.format().map(|_| h));
    let pcm_hash = compute_pcm_hash(&bytes);

    if json_output {
        let out = match &parsed {
            Ok(header) => InspectOutput {
                success: true,
                header: Some(HeaderJson::from(header)),
                pcm_hash,
                error: None,
            },
            Err(e) => InspectOutput {
                success: false,
                header: None,
                pcm_hash: None,
                error: Some(JsonError::from(e)),
            },
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(if parsed.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    let header = match parsed {
        Ok(header) => header,
        Err(e) => {
            eprintln!("  {} [{}] {}", "x".red().bold(), e.code(), e);
            return Ok(ExitCode::from(1));
        }
    };

    let info = HeaderJson::from(&header);
    println!("  {:<16} {}", "channels".dimmed(), info.channels);
    println!("  {:<16} {} Hz", "sample rate".dimmed(), info.sample_rate);
    println!("  {:<16} {}", "bits/sample".dimmed(), info.bits_per_sample);
    println!("  {:<16} {} B/s", "byte rate".dimmed(), info.byte_rate);
    println!("  {:<16} {}", "block align".dimmed(), info.block_align);
    println!("  {:<16} {} B", "data size".dimmed(), info.data_size);
    println!(
        "  {:<16} {} ({:.3}s)",
        "frames".dimmed(),
        info.frames,
        info.duration_seconds
    );
    if let Some(hash) = pcm_hash {
        println!("  {:<16} {}", "pcm hash".dimmed(), hash);
    } else {
        println!("  {} data chunk is truncated", "!".yellow());
    }

    Ok(ExitCode::SUCCESS)
}
