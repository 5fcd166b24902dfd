// ABOUTME: Movement CLI - runs squat technique analysis on recorded pose sessions
// ABOUTME: Lists the movement catalog, analyzes a trim window, and inspects per-frame features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List movements and their filming guides
//! movement-cli movements
//!
//! # Analyze seconds 1.0 to 4.5 of a recorded session
//! movement-cli analyze --recording session.json --movement squat_mvp --start 1.0 --end 4.5
//!
//! # Same, printing the persisted analysis record as JSON
//! movement-cli analyze --recording session.json --movement squat_mvp --start 1.0 --end 4.5 --json
//!
//! # Dump the per-frame features of a recording
//! movement-cli inspect --recording session.json
//! ```

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use movement_analysis::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "movement-cli",
    about = "Movement analysis CLI",
    long_about = "Analyze exercise technique from recorded pose sessions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List movement categories with filming guides
    Movements {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a trim window of a recorded session
    Analyze {
        /// Pose recording JSON file
        #[arg(long)]
        recording: PathBuf,

        /// Movement spec id (see `movements`)
        #[arg(long, default_value = "squat_mvp")]
        movement: String,

        /// Window start in seconds
        #[arg(long)]
        start: f64,

        /// Window end in seconds
        #[arg(long)]
        end: f64,

        /// Sampling rate override in Hz
        #[arg(long)]
        rate: Option<f64>,

        /// Frames in pose detection at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Video reference stored in the record (defaults to the recording path)
        #[arg(long)]
        video_url: Option<String>,

        /// Print the analysis record as JSON instead of the checklist
        #[arg(long)]
        json: bool,
    },

    /// Print per-frame features of a recording
    Inspect {
        /// Pose recording JSON file
        #[arg(long)]
        recording: PathBuf,

        /// Only frames at or after this time
        #[arg(long)]
        start: Option<f64>,

        /// Only frames before this time
        #[arg(long)]
        end: Option<f64>,

        /// Print features as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    match cli.command {
        Command::Movements { json } => commands::movements::list(json),
        Command::Analyze {
            recording,
            movement,
            start,
            end,
            rate,
            concurrency,
            video_url,
            json,
        } => {
            commands::analyze::run(commands::analyze::AnalyzeArgs {
                recording,
                movement,
                start,
                end,
                rate,
                concurrency,
                video_url,
                json,
            })
            .await
        }
        Command::Inspect {
            recording,
            start,
            end,
            json,
        } => commands::inspect::run(&recording, start, end, json).await,
    }
}
