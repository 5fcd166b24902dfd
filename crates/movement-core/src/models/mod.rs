// ABOUTME: Core data models for the movement-quality analysis pipeline
// ABOUTME: Re-exports landmarks, pose snapshots, frames, analysis results, and run records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every model except [`TrimWindow`] lives for a single pipeline run: frames
//! and snapshots are consumed into [`FeatureFrame`]s as soon as they are
//! produced, and only the final [`AnalysisResult`] leaves the run.
//!
//! ## Core Models
//!
//! - `Landmark` / `PoseSnapshot`: normalized body joints detected in one frame
//! - `TrimWindow` / `SampledFrame`: what gets sampled from the clip
//! - `FeatureFrame`: per-frame geometry fed to the classifier
//! - `AnalysisResult` / `AnalysisRecord`: what callers display and persist

mod analysis;
mod frame;
mod landmark;

pub use analysis::{AnalysisRecord, AnalysisResult, AnalysisStatus, CriterionOutcome};
pub use frame::{DecodedImage, FeatureFrame, SampledFrame, TrimWindow};
pub use landmark::{
    BodyLandmark, BodySide, Landmark, PoseSnapshot, SideChain, SnapshotShapeError,
};
