// ABOUTME: Threshold configuration for feature extraction and technique classification
// ABOUTME: Keeps the empirical squat heuristics as validated defaults instead of literals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Classifier and extraction thresholds
//!
//! The squat thresholds have no documented calibration. Defaults reproduce the
//! values athletes' existing results were computed with.

use serde::{Deserialize, Serialize};

use crate::constants::{classifier, pose};
use crate::errors::ConfigError;

/// Thresholds of the squat technique checklist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Minimum number of feature frames before classifying (never below 5)
    pub min_feature_frames: usize,
    /// Hip-angle closure in degrees from first to deepest frame that fails the spine check
    pub spine_closure_max_degrees: f64,
    /// Knee-past-ankle distance in normalized units that fails the knee travel check
    pub knee_travel_max: f64,
    /// How far below the knee the hip must go at the deepest point, normalized units
    pub depth_margin: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_feature_frames: classifier::MIN_FEATURE_FRAMES,
            spine_closure_max_degrees: classifier::SPINE_CLOSURE_MAX_DEGREES,
            knee_travel_max: classifier::KNEE_TRAVEL_MAX,
            depth_margin: classifier::DEPTH_MARGIN,
        }
    }
}

impl ClassifierThresholds {
    /// Validate threshold values
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is out of its meaningful range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_feature_frames < classifier::MIN_FEATURE_FRAMES {
            return Err(ConfigError::ValidationFailed(format!(
                "min_feature_frames must be >= {}",
                classifier::MIN_FEATURE_FRAMES
            )));
        }
        if !(0.0..=180.0).contains(&self.spine_closure_max_degrees) {
            return Err(ConfigError::InvalidRange(
                "spine_closure_max_degrees must be between 0 and 180",
            ));
        }
        if !(0.0..=1.0).contains(&self.knee_travel_max) {
            return Err(ConfigError::InvalidRange(
                "knee_travel_max must be between 0 and 1",
            ));
        }
        if !(-1.0..=1.0).contains(&self.depth_margin) {
            return Err(ConfigError::InvalidRange(
                "depth_margin must be between -1 and 1",
            ));
        }
        Ok(())
    }
}

/// Feature extraction settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Visibility every required landmark must strictly exceed
    pub visibility_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: pose::VISIBILITY_THRESHOLD,
        }
    }
}

impl ExtractionConfig {
    /// Validate extraction settings
    ///
    /// # Errors
    ///
    /// Returns an error if the visibility threshold is not within `[0, 1)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::InvalidRange(
                "visibility_threshold must be in [0, 1)",
            ));
        }
        Ok(())
    }
}
