//! pcmforge CLI - render and inspect synthesized WAV files
//!
//! Log output goes to stderr and is controlled with `RUST_LOG`
//! (default `pcmforge=info`).

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pcmforge_cli::commands;
use pcmforge_cli::demos::Demo;

/// pcmforge - PCM synthesis and WAV encoding
#[derive(Parser)]
#[command(name = "pcmforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON score to a WAV file
    Render {
        /// Path to the score file (JSON)
        #[arg(short, long)]
        score: String,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render one of the built-in demos
    Demo {
        /// Which demo to render (every demo when omitted)
        #[arg(value_enum)]
        demo: Option<Demo>,

        /// Directory the WAV files are written to
        #[arg(long, default_value = ".")]
        out_dir: String,
    },

    /// Print the header fields and PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pcmforge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Render {
            score,
            output,
            json,
        } => commands::render::run(&score, &output, json),
        Commands::Demo { demo, out_dir } => commands::demo::run(demo, &out_dir),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
