// ABOUTME: Recorded pose track document used to replay a session without a video decoder
// ABOUTME: Parses and validates recordings and resolves the snapshot shown at a timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recorded Session Replay
//!
//! A [`PoseRecording`] is the pose track of a filmed session captured once by
//! an external model:
//!
//! ```json
//! {
//!   "durationSeconds": 3.0,
//!   "frames": [
//!     { "timestamp": 0.0, "landmarks": [ { "x": 0.5, "y": 0.3, "visibility": 0.9 }, ... ] },
//!     { "timestamp": 0.1, "landmarks": null }
//!   ]
//! }
//! ```
//!
//! [`RecordingClip`] and [`RecordingPoseProvider`] serve the same recording
//! through the collaborator traits so the pipeline runs unchanged.

mod clip;
mod provider;

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

use crate::models::PoseSnapshot;

pub use clip::{RecordingClip, RecordingDecoder};
pub use provider::RecordingPoseProvider;

/// Slack allowed when comparing a sample timestamp to a recorded one
const TIMESTAMP_SLACK: f64 = 1e-6;

/// Failures loading a recording
#[derive(Debug, Error)]
pub enum RecordingError {
    /// The file could not be read
    #[error("Failed to read recording: {0}")]
    Io(#[from] io::Error),

    /// The document is not a valid recording
    #[error("Malformed recording: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but violates a recording invariant
    #[error("Invalid recording: {0}")]
    Invalid(String),
}

/// One recorded frame, `landmarks` is `null` when no person was detected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedPose {
    /// Seconds from the start of the video
    pub timestamp: f64,
    /// Detected pose, if any
    #[serde(default)]
    pub landmarks: Option<PoseSnapshot>,
}

/// Pose track of a whole video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseRecording {
    /// Total video length in seconds
    pub duration_seconds: f64,
    /// Source frame width in pixels, informational
    #[serde(default)]
    pub width: u32,
    /// Source frame height in pixels, informational
    #[serde(default)]
    pub height: u32,
    /// Frames in strictly increasing timestamp order
    pub frames: Vec<RecordedPose>,
}

impl PoseRecording {
    /// Parse and validate a recording document
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a snapshot does not have
    /// 33 landmarks, or the frames violate ordering/duration bounds
    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        let recording: Self = serde_json::from_str(json)?;
        recording.validate()?;
        Ok(recording)
    }

    /// Read and parse a recording file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid recording
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RecordingError> {
        let json = fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json)
    }

    /// Check duration and frame ordering
    ///
    /// # Errors
    ///
    /// Returns `RecordingError::Invalid` describing the first violation
    pub fn validate(&self) -> Result<(), RecordingError> {
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(RecordingError::Invalid(format!(
                "duration must be positive, got {}",
                self.duration_seconds
            )));
        }

        for frame in &self.frames {
            if !frame.timestamp.is_finite()
                || frame.timestamp < 0.0
                || frame.timestamp > self.duration_seconds
            {
                return Err(RecordingError::Invalid(format!(
                    "frame timestamp {} outside [0, {}]",
                    frame.timestamp, self.duration_seconds
                )));
            }
        }

        if let Some(pair) = self
            .frames
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(RecordingError::Invalid(format!(
                "frame timestamps not strictly increasing at {}",
                pair[1].timestamp
            )));
        }

        Ok(())
    }

    /// Half of the smallest gap between consecutive recorded frames
    ///
    /// A recording with fewer than two frames matches any later timestamp.
    #[must_use]
    pub fn match_tolerance(&self) -> f64 {
        self.frames
            .windows(2)
            .map(|pair| pair[1].timestamp - pair[0].timestamp)
            .reduce(f64::min)
            .map_or(f64::INFINITY, |gap| gap / 2.0)
    }

    /// Snapshot recorded nearest to, and not after, `timestamp`
    ///
    /// Returns `None` when the closest earlier frame is further away than
    /// [`Self::match_tolerance`] or recorded no person.
    #[must_use]
    pub fn snapshot_at(&self, timestamp: f64) -> Option<&PoseSnapshot> {
        self.snapshot_within(timestamp, self.match_tolerance())
    }

    /// Snapshot recorded nearest to, and not after, `timestamp`, at most `tolerance` earlier
    ///
    /// Binary search only; callers looking up many timestamps compute
    /// [`Self::match_tolerance`] once and pass it here.
    #[must_use]
    pub fn snapshot_within(&self, timestamp: f64, tolerance: f64) -> Option<&PoseSnapshot> {
        let after = self
            .frames
            .partition_point(|frame| frame.timestamp <= timestamp + TIMESTAMP_SLACK);
        let frame = self.frames.get(after.checked_sub(1)?)?;

        if timestamp - frame.timestamp > tolerance + TIMESTAMP_SLACK {
            return None;
        }
        frame.landmarks.as_ref()
    }
}
