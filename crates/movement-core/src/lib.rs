// ABOUTME: Core types and constants for the movement-quality analysis engine
// ABOUTME: Foundation crate with error handling, domain models, movement catalog, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Movement Core
//!
//! Foundation crate providing the shared types of the movement-quality
//! analyzer. Algorithms live in `movement-intelligence`, collaborator
//! interfaces in `movement-providers`; both depend only on this crate.
//!
//! ## Modules
//!
//! - **errors**: `AnalysisError` taxonomy, `ErrorCategory`, and `ConfigError`
//! - **constants**: Landmark topology and default analysis thresholds
//! - **models**: Landmarks, pose snapshots, frames, results, and run records
//! - **catalog**: Supported movements and their filming guides

/// Error taxonomy for analysis runs and configuration
pub mod errors;

/// Landmark topology and default analysis thresholds
pub mod constants;

/// Domain models shared by every stage of the pipeline
pub mod models;

/// Catalog of analyzable movements grouped by category
pub mod catalog;

pub use errors::{AnalysisError, ConfigError, ErrorCategory, PipelineResult};
