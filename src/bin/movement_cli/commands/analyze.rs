// ABOUTME: analyze subcommand running the pipeline over a recorded session
// ABOUTME: Reports progress on stderr, cancels on Ctrl-C, and prints the checklist or record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use movement_analysis::catalog::find_movement;
use movement_analysis::config::PipelineConfig;
use movement_analysis::models::{AnalysisRecord, TrimWindow};
use movement_analysis::pipeline::{
    AnalysisPipeline, AnalysisProgress, AnalysisRequest, AnalysisRun, CancellationToken,
};
use movement_analysis::providers::{PoseRecording, RecordingClip, RecordingPoseProvider};
use movement_analysis::report::{render_failure, render_result};
use tokio::signal;
use tokio::sync::mpsc;
use tracing::info;

/// Arguments of the analyze subcommand
pub struct AnalyzeArgs {
    /// Pose recording file
    pub recording: PathBuf,
    /// Movement spec id
    pub movement: String,
    /// Window start in seconds
    pub start: f64,
    /// Window end in seconds
    pub end: f64,
    /// Sampling rate override
    pub rate: Option<f64>,
    /// Detection concurrency override
    pub concurrency: Option<usize>,
    /// Video reference for the record
    pub video_url: Option<String>,
    /// Print JSON
    pub json: bool,
}

/// Analyze one trim window and print the outcome
pub async fn run(args: AnalyzeArgs) -> Result<ExitCode> {
    let mut config = PipelineConfig::from_env()?;
    if let Some(concurrency) = args.concurrency {
        config.extraction_concurrency = concurrency;
    }

    let recording = Arc::new(PoseRecording::load(&args.recording).await?);
    info!(
        path = %args.recording.display(),
        frames = recording.frames.len(),
        duration = recording.duration_seconds,
        "Loaded pose recording"
    );

    let clip = RecordingClip::new(Arc::clone(&recording));
    let pipeline = AnalysisPipeline::new(config)?
        .with_pose_provider(Arc::new(RecordingPoseProvider::new(recording)));

    let movement_name = find_movement(&args.movement)
        .map_or_else(|| args.movement.clone(), |movement| movement.name.to_owned());
    let video_url = args
        .video_url
        .unwrap_or_else(|| args.recording.display().to_string());
    let mut record = AnalysisRecord::pending(movement_name.clone(), video_url);

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<AnalysisProgress>();
    let show_progress = !args.json;
    let progress_task = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            if show_progress {
                eprint!("\rAnalyzing... {:>3}%", progress.percent);
                let _ = io::stderr().flush();
            }
        }
        if show_progress {
            eprintln!();
        }
    });

    let mut request = AnalysisRequest::new(
        &clip,
        args.movement.as_str(),
        TrimWindow::new(args.start, args.end),
    )
    .with_cancellation(cancellation)
    .with_progress(progress_tx);
    if let Some(rate) = args.rate {
        request = request.with_sample_rate(rate);
    }

    let mut run = AnalysisRun::new();
    let outcome = pipeline.execute(&mut run, request).await;
    // The request, and with it the progress sender, is gone once execute returns
    progress_task.await?;

    record.resolve(&outcome);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        match &outcome {
            Ok(result) => print!("{}", render_result(&movement_name, result)),
            Err(error) => eprintln!("{}", render_failure(error)),
        }
    }

    Ok(match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) if !error.is_failure() => ExitCode::from(130),
        Err(_) => ExitCode::FAILURE,
    })
}
