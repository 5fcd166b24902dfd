// ABOUTME: Pose estimation collaborator trait returning at most one person per frame
// ABOUTME: The concrete model is external; the pipeline only depends on this interface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::errors::PipelineResult;
use crate::models::{PoseSnapshot, SampledFrame};

/// Single-person pose estimator
///
/// Implementations must not smooth across frames: each call depends only on
/// the frame passed in. When the pipeline runs several frames in flight,
/// `detect` is called concurrently, so implementations serialize internally
/// if the model cannot.
#[async_trait]
pub trait PoseProvider: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Whether the model is loaded and able to serve `detect`
    fn is_ready(&self) -> bool {
        true
    }

    /// Detect the pose in `frame`, `None` when no person is found
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::PoseEstimation` if the model fails
    async fn detect(&self, frame: &SampledFrame) -> PipelineResult<Option<PoseSnapshot>>;
}
