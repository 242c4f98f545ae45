//! Render command implementation
//!
//! Renders a JSON score to a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use pcmforge::{RenderSummary, Score};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use super::JsonError;

/// Machine-readable result of a render.
#[derive(Debug, Serialize)]
struct RenderOutput<'a> {
    success: bool,
    score: &'a str,
    output: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RenderSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 success, 1 score error, 2 render error
pub fn run(score_path: &str, output: &str, json_output: bool) -> Result<ExitCode> {
    let source = fs::read_to_string(score_path)
        .with_context(|| format!("Failed to read score file: {}", score_path))?;

    let score = match Score::from_json(&source) {
        Ok(score) => score,
        Err(e) => {
            report(score_path, output, Err(JsonError::from(&e)), json_output)?;
            return Ok(ExitCode::from(1));
        }
    };

    debug!(ops = score.ops.len(), "loaded score");

    let start = Instant::now();
    if !json_output {
        println!("{} {}", "Rendering:".cyan().bold(), score_path);
        println!(
            "  {} Hz, {} bit, {} channel(s), {} op(s)",
            score.config.sample_rate,
            score.config.bit_depth,
            score.config.channels,
            score.ops.len()
        );
    }

    match score.render(output) {
        Ok(summary) => {
            report(score_path, output, Ok(summary), json_output)?;
            if !json_output {
                println!(
                    "{} in {:.2?}",
                    "Done".green().bold(),
                    start.elapsed()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report(score_path, output, Err(JsonError::from(&e)), json_output)?;
            Ok(ExitCode::from(2))
        }
    }
}

fn report(
    score_path: &str,
    output: &str,
    result: std::result::Result<RenderSummary, JsonError>,
    json_output: bool,
) -> Result<()> {
    if json_output {
        let (summary, error) = match result {
            Ok(summary) => (Some(summary), None),
            Err(error) => (None, Some(error)),
        };
        let out = RenderOutput {
            success: error.is_none(),
            score: score_path,
            output,
            summary,
            error,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match result {
        Ok(summary) => print_summary(output, &summary),
        Err(error) => eprintln!(
            "  {} [{}] {}",
            "x".red().bold(),
            error.code,
            error.message
        ),
    }
    Ok(())
}

pub(crate) fn print_summary(output: &str, summary: &RenderSummary) {
    println!("  {} {}", "->".green(), output);
    println!(
        "     {} frames, {} bytes, {:.3}s",
        summary.frames, summary.data_bytes, summary.duration_seconds
    );
    println!("     {} {}", "pcm:".dimmed(), summary.pcm_hash.dimmed());
}
