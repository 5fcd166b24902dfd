// ABOUTME: Main library entry point for the movement analysis engine
// ABOUTME: Turns a trimmed exercise video into a squat technique checklist from pose landmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Movement Analysis
//!
//! Video-based technique feedback for strength exercises. Given a clip, a
//! trim window and a movement from the catalog, the engine samples frames at
//! a fixed rate, detects a pose in each, derives per-frame joint geometry and
//! evaluates a checklist of technique criteria at the deepest point of the
//! movement.
//!
//! ## Architecture
//!
//! - **`movement-core`**: errors, constants, models, movement catalog
//! - **`movement-intelligence`**: feature extraction and classification
//! - **`movement-providers`**: video and pose collaborator traits, frame sampler, replay
//! - **this crate**: pipeline orchestration, configuration, logging, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use movement_analysis::config::PipelineConfig;
//! use movement_analysis::models::TrimWindow;
//! use movement_analysis::pipeline::{AnalysisPipeline, AnalysisRequest, AnalysisRun};
//! use movement_analysis::providers::{PoseRecording, RecordingClip, RecordingPoseProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let recording = Arc::new(PoseRecording::load("squat.json").await?);
//!     let clip = RecordingClip::new(Arc::clone(&recording));
//!     let pipeline = AnalysisPipeline::new(PipelineConfig::from_env()?)?
//!         .with_pose_provider(Arc::new(RecordingPoseProvider::new(recording)));
//!
//!     let mut run = AnalysisRun::new();
//!     let request = AnalysisRequest::new(&clip, "squat_mvp", TrimWindow::new(0.0, 2.5));
//!     let result = pipeline.execute(&mut run, request).await?;
//!     println!("depth reached: {}", result.depth_achieved);
//!     Ok(())
//! }
//! ```

// ── Workspace crate re-exports ──────────────────────────────────────────

pub use movement_core::catalog;
pub use movement_core::constants;
pub use movement_core::errors;
pub use movement_core::models;

/// Feature extraction and technique classification
pub use movement_intelligence as intelligence;

/// Video and pose collaborators, frame sampling, and replay
pub use movement_providers as providers;

// ── Public API ──────────────────────────────────────────────────────────

/// Pipeline configuration loaded from the environment
pub mod config;

/// Structured logging setup
pub mod logging;

/// Analysis orchestration, run state, progress, and cancellation
pub mod pipeline;

/// Plain-text rendering of analysis results
pub mod report;
