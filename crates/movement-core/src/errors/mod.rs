// ABOUTME: Error taxonomy for movement analysis runs with user-facing categories
// ABOUTME: Distinguishes technical failures, insufficient data, invalid input, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Error Types
//!
//! Every failure of a pipeline run is an [`AnalysisError`]. Errors are never
//! retried internally: a run is all-or-nothing and the caller decides whether
//! to invoke the pipeline again. [`ErrorCategory`] groups variants by the
//! remediation the user needs, since "reframe and retry" and "technical
//! failure" call for different messages upstream.

mod config;

pub use config::ConfigError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by every pipeline stage
pub type PipelineResult<T> = Result<T, AnalysisError>;

/// Errors that abort an analysis run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Pipeline invoked before its pose-estimation dependency is ready, or misused
    #[error("Analyzer is not configured: {reason}")]
    Configuration {
        /// What is missing or not initialized
        reason: String,
    },

    /// Movement identifier has no classifier ruleset
    #[error("Movement '{movement_id}' is not supported for analysis")]
    UnsupportedMovement {
        /// Identifier received from the caller
        movement_id: String,
    },

    /// Trim window is empty, reversed, or outside the clip
    #[error("Invalid trim window [{start:.3}s, {end:.3}s): {reason}")]
    InvalidWindow {
        /// Window start in seconds
        start: f64,
        /// Window end in seconds
        end: f64,
        /// Which constraint the window violates
        reason: &'static str,
    },

    /// Sampling rate is zero, negative, or not finite
    #[error("Invalid sampling rate: {rate_hz} Hz")]
    InvalidSamplingRate {
        /// Rejected rate in hertz
        rate_hz: f64,
    },

    /// Seeking or decoding the frame at a timestamp failed
    #[error("Failed to decode frame at {timestamp:.3}s: {reason}")]
    Decode {
        /// Timestamp of the failed tick in seconds
        timestamp: f64,
        /// Decoder-provided description
        reason: String,
    },

    /// The pose model failed or returned a malformed snapshot
    #[error("Pose estimation failed at {timestamp:.3}s: {reason}")]
    PoseEstimation {
        /// Timestamp of the failed tick in seconds
        timestamp: f64,
        /// Model-provided description
        reason: String,
    },

    /// Feature frames reached the classifier out of timestamp order
    #[error("Feature frames out of order: {current:.3}s follows {previous:.3}s")]
    OutOfOrder {
        /// Timestamp of the earlier frame in the sequence
        previous: f64,
        /// Timestamp that does not strictly follow it
        current: f64,
    },

    /// Too few frames cleared the visibility threshold to classify
    #[error("Only {valid_frames} usable frames detected, at least {required} are required")]
    InsufficientData {
        /// Number of feature frames accumulated
        valid_frames: usize,
        /// Minimum number of feature frames for classification
        required: usize,
    },

    /// The caller cancelled the run
    #[error("Analysis cancelled after {ticks_completed} of {total_ticks} frames")]
    Cancelled {
        /// Ticks fully processed before cancellation was observed
        ticks_completed: usize,
        /// Ticks planned for the window
        total_ticks: usize,
    },
}

/// Remediation-oriented grouping of [`AnalysisError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// The analyzer is not set up (model not loaded, unknown movement)
    Configuration,
    /// Caller-supplied parameters are invalid
    InvalidInput,
    /// Video or model failure
    Technical,
    /// Poor framing or occlusion, the user should reframe and retry
    InsufficientData,
    /// The run was stopped on purpose
    Cancelled,
}

impl AnalysisError {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Create an unsupported movement error
    #[must_use]
    pub fn unsupported_movement(movement_id: impl Into<String>) -> Self {
        Self::UnsupportedMovement {
            movement_id: movement_id.into(),
        }
    }

    /// Create a decode error for the tick at `timestamp`
    #[must_use]
    pub fn decode(timestamp: f64, reason: impl Into<String>) -> Self {
        Self::Decode {
            timestamp,
            reason: reason.into(),
        }
    }

    /// Create a pose estimation error for the tick at `timestamp`
    #[must_use]
    pub fn pose_estimation(timestamp: f64, reason: impl Into<String>) -> Self {
        Self::PoseEstimation {
            timestamp,
            reason: reason.into(),
        }
    }

    /// Remediation category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } | Self::UnsupportedMovement { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidWindow { .. } | Self::InvalidSamplingRate { .. } => {
                ErrorCategory::InvalidInput
            }
            Self::Decode { .. } | Self::PoseEstimation { .. } | Self::OutOfOrder { .. } => {
                ErrorCategory::Technical
            }
            Self::InsufficientData { .. } => ErrorCategory::InsufficientData,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }

    /// Whether this error means the analysis failed (cancellation does not)
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }

    /// Message surfaced to the athlete, worded by remediation
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "The analysis engine is not available right now. Please try again in a moment."
                    .to_owned()
            }
            ErrorCategory::InvalidInput => {
                "The selected section of the video is invalid. Please trim the video again."
                    .to_owned()
            }
            ErrorCategory::Technical => {
                "A technical problem occurred while reading the video. Please re-upload it and retry."
                    .to_owned()
            }
            ErrorCategory::InsufficientData => {
                "We could not detect your body. Film from the side with your whole body visible, \
                 keep the phone steady, and make sure the selected section covers the full movement."
                    .to_owned()
            }
            ErrorCategory::Cancelled => "The analysis was cancelled.".to_owned(),
        }
    }
}
