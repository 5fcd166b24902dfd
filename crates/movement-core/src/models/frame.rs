// ABOUTME: Trim window, sampled frame, and per-frame feature types of the analysis pipeline
// ABOUTME: Validates trim windows against the clip before any frame is sampled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::landmark::BodySide;
use crate::errors::{AnalysisError, PipelineResult};

/// Caller-chosen `[start, end)` section of the clip to analyze, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    /// Inclusive start in seconds
    pub start: f64,
    /// Exclusive end in seconds
    pub end: f64,
}

impl TrimWindow {
    /// Create a window (not validated)
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the window in seconds
    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Check that the window is finite, starts at or after zero, and is not empty
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidWindow` naming the violated constraint
    pub fn validate_shape(&self) -> PipelineResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(self.invalid("bounds must be finite"));
        }
        if self.start < 0.0 {
            return Err(self.invalid("start must not be negative"));
        }
        if self.length() <= 0.0 {
            return Err(self.invalid("end must be after start"));
        }
        Ok(())
    }

    /// Check the window shape and that it fits inside a clip of `clip_duration` seconds
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidWindow` naming the violated constraint
    pub fn validate_within(&self, clip_duration: f64) -> PipelineResult<()> {
        self.validate_shape()?;
        if !clip_duration.is_finite() || self.end > clip_duration {
            return Err(self.invalid("end exceeds the clip duration"));
        }
        Ok(())
    }

    const fn invalid(&self, reason: &'static str) -> AnalysisError {
        AnalysisError::InvalidWindow {
            start: self.start,
            end: self.end,
            reason,
        }
    }
}

/// Decoded bitmap handed to the pose model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel buffer in the decoder's native layout
    pub pixels: Bytes,
}

impl DecodedImage {
    /// Create an image from a pixel buffer
    #[must_use]
    pub const fn new(width: u32, height: u32, pixels: Bytes) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// One decoded frame produced by a sampling tick
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFrame {
    /// Zero-based tick index within the window
    pub tick: usize,
    /// Position in the clip, seconds
    pub timestamp: f64,
    /// Decoded bitmap
    pub image: DecodedImage,
}

/// Geometry of one frame consumed by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFrame {
    /// Timestamp of the source frame, seconds
    pub time: f64,
    /// Normalized hip height (grows downward)
    pub hip_y: f64,
    /// Normalized knee height (grows downward)
    pub knee_y: f64,
    /// Normalized horizontal knee position
    pub knee_x: f64,
    /// Normalized horizontal ankle position
    pub ankle_x: f64,
    /// Interior shoulder-hip-knee angle at the hip, degrees in `[0, 180]`
    pub back_angle: f64,
    /// Body side the joints were taken from
    pub side: BodySide,
}
