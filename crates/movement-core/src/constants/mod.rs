// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Landmark topology, sampling defaults, and classifier thresholds for movement analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Groups the numeric constants of the analyzer by domain. The classifier
//! thresholds are empirical heuristics kept at their historical values; they
//! are exposed as defaults of the configuration types rather than used as
//! literals in the algorithms.

/// Pose model topology
pub mod pose {
    /// Number of landmarks in every pose snapshot (33-point body topology)
    pub const LANDMARK_COUNT: usize = 33;
    /// Minimum per-landmark visibility a landmark must exceed to be trusted
    pub const VISIBILITY_THRESHOLD: f64 = 0.5;
}

/// Frame sampling defaults
pub mod sampling {
    /// Default sampling rate in hertz
    pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 10.0;
    /// Default number of frames in flight in the pose model
    pub const DEFAULT_EXTRACTION_CONCURRENCY: usize = 1;
    /// Upper bound for in-flight frames
    pub const MAX_EXTRACTION_CONCURRENCY: usize = 16;
    /// Tolerance absorbing floating-point noise in `duration * rate` before `ceil`
    pub const TICK_EPSILON: f64 = 1e-9;
}

/// Classifier defaults for the squat ruleset
pub mod classifier {
    /// Minimum number of feature frames required before classifying
    pub const MIN_FEATURE_FRAMES: usize = 5;
    /// Hip-angle closure (degrees) between first and deepest frame that flags lumbar flexion
    pub const SPINE_CLOSURE_MAX_DEGREES: f64 = 20.0;
    /// Forward knee travel past the ankle (normalized units) that flags uncontrolled knees
    pub const KNEE_TRAVEL_MAX: f64 = 0.08;
    /// Extra depth the hip must reach below the knee (normalized units)
    pub const DEPTH_MARGIN: f64 = 0.0;
}

/// Service names used in structured logs
pub mod service_names {
    /// Service name of the analysis engine
    pub const MOVEMENT_ANALYSIS: &str = "movement-analysis";
}
