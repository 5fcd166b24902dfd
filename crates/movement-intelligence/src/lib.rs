// ABOUTME: Movement intelligence engine with feature extraction and technique classification
// ABOUTME: Stateless algorithms turning pose snapshots into a technique checklist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Movement Intelligence
//!
//! Pure algorithms of the analyzer:
//!
//! - **features**: per-frame geometry (`FeatureExtractor`, `calculate_angle`)
//! - **classifier**: sequence classification against a technique checklist
//! - **config**: thresholds shared by both, with validation

// Re-export movement-core modules so algorithms can keep `use crate::models::*`
pub use movement_core::catalog;
pub use movement_core::constants;
pub use movement_core::errors;
pub use movement_core::models;

/// Classifier and extraction thresholds
pub mod config;

/// Per-frame biomechanical feature extraction
pub mod features;

/// Rule-based technique classification over a feature sequence
pub mod classifier;

pub use classifier::{
    controlled_knee_travel, depth_achieved, find_extremum, is_time_ordered, neutral_spine,
    BiomechanicalClassifier, Classification, MovementContext,
};
pub use config::{ClassifierThresholds, ExtractionConfig};
pub use features::{calculate_angle, FeatureExtractor};
