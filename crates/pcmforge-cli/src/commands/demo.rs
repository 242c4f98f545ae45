//! Demo command implementation
//!
//! Renders the built-in demo scores.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::render::print_summary;
use crate::demos::Demo;

/// Run the demo command
///
/// Renders `demo`, or every demo when it is `None`.
///
/// # Returns
/// Exit code: 0 if every demo rendered, 2 otherwise
pub fn run(demo: Option<Demo>, out_dir: &str) -> Result<ExitCode> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir))?;

    let mut failures = 0;
    for demo in Demo::selected(demo) {
        let path = Path::new(out_dir).join(demo.file_name());
        let display = path.display().to_string();
        println!("{} {:?}", "Rendering demo:".cyan().bold(), demo);

        match demo.score().render(&path) {
            Ok(summary) => print_summary(&display, &summary),
            Err(e) => {
                failures += 1;
                eprintln!("  {} [{}] {}", "x".red().bold(), e.code(), e);
            }
        }
    }

    if failures > 0 {
        eprintln!("{} {} demo(s) failed", "error:".red().bold(), failures);
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
