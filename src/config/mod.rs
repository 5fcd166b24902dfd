// ABOUTME: Pipeline configuration with defaults, environment overrides, and validation
// ABOUTME: Groups sampling, concurrency, extraction, and classifier threshold settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::sampling;
use crate::errors::ConfigError;
use crate::intelligence::{ClassifierThresholds, ExtractionConfig};

/// Environment variable overriding [`PipelineConfig::sample_rate_hz`]
pub const ENV_SAMPLE_RATE_HZ: &str = "MOVEMENT_SAMPLE_RATE_HZ";
/// Environment variable overriding [`PipelineConfig::extraction_concurrency`]
pub const ENV_EXTRACTION_CONCURRENCY: &str = "MOVEMENT_EXTRACTION_CONCURRENCY";
/// Environment variable overriding the landmark visibility threshold
pub const ENV_VISIBILITY_THRESHOLD: &str = "MOVEMENT_VISIBILITY_THRESHOLD";
/// Environment variable overriding the minimum number of feature frames
pub const ENV_MIN_FEATURE_FRAMES: &str = "MOVEMENT_MIN_FEATURE_FRAMES";
/// Environment variable overriding the spine closure threshold in degrees
pub const ENV_SPINE_CLOSURE_MAX_DEGREES: &str = "MOVEMENT_SPINE_CLOSURE_MAX_DEGREES";
/// Environment variable overriding the knee travel threshold
pub const ENV_KNEE_TRAVEL_MAX: &str = "MOVEMENT_KNEE_TRAVEL_MAX";
/// Environment variable overriding the depth margin
pub const ENV_DEPTH_MARGIN: &str = "MOVEMENT_DEPTH_MARGIN";

/// Settings for one analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frames sampled per second of video
    pub sample_rate_hz: f64,
    /// Frames allowed in pose detection at once, results stay in tick order
    pub extraction_concurrency: usize,
    /// Per-frame feature extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Classifier thresholds
    #[serde(default)]
    pub thresholds: ClassifierThresholds,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: sampling::DEFAULT_SAMPLE_RATE_HZ,
            extraction_concurrency: sampling::DEFAULT_EXTRACTION_CONCURRENCY,
            extraction: ExtractionConfig::default(),
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration: defaults, then environment overrides, then validation
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed or the
    /// resulting configuration is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting
    ///
    /// # Errors
    ///
    /// Returns the first setting found out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "sample_rate_hz must be a positive number",
            ));
        }
        if self.extraction_concurrency == 0
            || self.extraction_concurrency > sampling::MAX_EXTRACTION_CONCURRENCY
        {
            return Err(ConfigError::ValidationFailed(format!(
                "extraction_concurrency must be within 1..={}, got {}",
                sampling::MAX_EXTRACTION_CONCURRENCY,
                self.extraction_concurrency
            )));
        }
        self.extraction.validate()?;
        self.thresholds.validate()
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        override_from_env(ENV_SAMPLE_RATE_HZ, &mut self.sample_rate_hz)?;
        override_from_env(
            ENV_EXTRACTION_CONCURRENCY,
            &mut self.extraction_concurrency,
        )?;
        override_from_env(
            ENV_VISIBILITY_THRESHOLD,
            &mut self.extraction.visibility_threshold,
        )?;
        override_from_env(
            ENV_MIN_FEATURE_FRAMES,
            &mut self.thresholds.min_feature_frames,
        )?;
        override_from_env(
            ENV_SPINE_CLOSURE_MAX_DEGREES,
            &mut self.thresholds.spine_closure_max_degrees,
        )?;
        override_from_env(ENV_KNEE_TRAVEL_MAX, &mut self.thresholds.knee_travel_max)?;
        override_from_env(ENV_DEPTH_MARGIN, &mut self.thresholds.depth_margin)?;
        Ok(self)
    }
}

/// Replace `target` with the parsed value of `variable` when it is set
fn override_from_env<T: FromStr>(variable: &'static str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = env::var(variable) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse { variable, value })?;
    }
    Ok(())
}
