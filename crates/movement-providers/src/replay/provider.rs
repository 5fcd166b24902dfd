// ABOUTME: Pose provider serving snapshots from a recording instead of a live model
// ABOUTME: Matches each sampled frame to the recorded frame shown at its timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;

use super::PoseRecording;
use crate::errors::PipelineResult;
use crate::models::{PoseSnapshot, SampledFrame};
use crate::pose::PoseProvider;

/// `PoseProvider` over a recorded pose track
#[derive(Debug, Clone)]
pub struct RecordingPoseProvider {
    recording: Arc<PoseRecording>,
    tolerance: f64,
}

impl RecordingPoseProvider {
    /// Serve snapshots from `recording`
    #[must_use]
    pub fn new(recording: Arc<PoseRecording>) -> Self {
        let tolerance = recording.match_tolerance();
        Self {
            recording,
            tolerance,
        }
    }

    /// Matching tolerance, fixed when the provider was built
    #[must_use]
    pub const fn match_tolerance(&self) -> f64 {
        self.tolerance
    }
}

#[async_trait]
impl PoseProvider for RecordingPoseProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn detect(&self, frame: &SampledFrame) -> PipelineResult<Option<PoseSnapshot>> {
        Ok(self
            .recording
            .snapshot_within(frame.timestamp, self.tolerance)
            .cloned())
    }
}
