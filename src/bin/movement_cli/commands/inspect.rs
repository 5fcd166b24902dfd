// ABOUTME: inspect subcommand printing the feature frame of every recorded pose
// ABOUTME: Extracts all frames in parallel and marks the deepest one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use movement_analysis::config::PipelineConfig;
use movement_analysis::intelligence::{find_extremum, FeatureExtractor};
use movement_analysis::providers::PoseRecording;

/// Print the features of each usable recorded pose
pub async fn run(
    path: &Path,
    start: Option<f64>,
    end: Option<f64>,
    json: bool,
) -> Result<ExitCode> {
    let config = PipelineConfig::from_env()?;
    let recording = PoseRecording::load(path).await?;

    let start = start.unwrap_or(0.0);
    let end = end.unwrap_or(f64::INFINITY);
    let snapshots: Vec<_> = recording
        .frames
        .iter()
        .filter(|frame| frame.timestamp >= start && frame.timestamp < end)
        .filter_map(|frame| {
            frame
                .landmarks
                .clone()
                .map(|snapshot| (frame.timestamp, snapshot))
        })
        .collect();

    let features = FeatureExtractor::new(config.extraction).extract_all(&snapshots);
    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(ExitCode::SUCCESS);
    }

    let deepest = find_extremum(&features).map(|(index, _)| index);
    println!(
        "{:>8} {:>6} {:>7} {:>7} {:>7} {:>7} {:>9}",
        "time", "side", "hip_y", "knee_y", "knee_x", "ankle_x", "back_deg"
    );
    for (index, frame) in features.iter().enumerate() {
        let marker = if Some(index) == deepest { " <- deepest" } else { "" };
        println!(
            "{:>8.3} {:>6} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>9.1}{marker}",
            frame.time,
            frame.side.as_str(),
            frame.hip_y,
            frame.knee_y,
            frame.knee_x,
            frame.ankle_x,
            frame.back_angle
        );
    }
    println!(
        "{} of {} recorded poses usable",
        features.len(),
        snapshots.len()
    );
    Ok(ExitCode::SUCCESS)
}
