// ABOUTME: Per-frame biomechanical feature extraction from pose snapshots
// ABOUTME: Applies the hard visibility cutoff and computes the hip-vertex back angle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Feature Extraction
//!
//! Turns one [`PoseSnapshot`] into one [`FeatureFrame`], or nothing when the
//! required joints are not trusted. A joint chain is trusted only if its
//! shoulder, hip, knee, and ankle all strictly exceed the visibility
//! threshold; there is no weighting of partially visible joints.
//!
//! The left chain is tried first, then the right one. Joints are never mixed
//! across sides.

use rayon::prelude::*;
use tracing::trace;

use crate::config::ExtractionConfig;
use crate::models::{BodySide, FeatureFrame, Landmark, PoseSnapshot};

/// Interior angle at `vertex` between the rays towards `a` and `c`, in degrees
///
/// Reflex angles are folded back, so for finite inputs the result is always
/// within `[0, 180]`. Non-finite coordinates yield `NaN`.
#[must_use]
pub fn calculate_angle(a: &Landmark, vertex: &Landmark, c: &Landmark) -> f64 {
    let radians = (c.y - vertex.y).atan2(c.x - vertex.x) - (a.y - vertex.y).atan2(a.x - vertex.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Stateless per-frame feature extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    config: ExtractionConfig,
}

impl FeatureExtractor {
    /// Create an extractor with the given settings
    #[must_use]
    pub const fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Visibility threshold in use
    #[must_use]
    pub const fn visibility_threshold(&self) -> f64 {
        self.config.visibility_threshold
    }

    /// Features of the frame at `time`, or `None` if neither side is fully visible
    #[must_use]
    pub fn extract(&self, snapshot: &PoseSnapshot, time: f64) -> Option<FeatureFrame> {
        let frame = [BodySide::Left, BodySide::Right]
            .into_iter()
            .find_map(|side| self.extract_side(snapshot, time, side));

        if frame.is_none() {
            trace!(time, "No joint chain cleared the visibility threshold");
        }
        frame
    }

    /// Extract a whole recorded track, keeping input order
    ///
    /// Frames are independent, so the work is spread across the rayon pool;
    /// the output order matches `snapshots`.
    #[must_use]
    pub fn extract_all(&self, snapshots: &[(f64, PoseSnapshot)]) -> Vec<FeatureFrame> {
        snapshots
            .par_iter()
            .filter_map(|(time, snapshot)| self.extract(snapshot, *time))
            .collect()
    }

    fn extract_side(
        &self,
        snapshot: &PoseSnapshot,
        time: f64,
        side: BodySide,
    ) -> Option<FeatureFrame> {
        let chain = side.chain();
        let shoulder = snapshot.landmark(chain.shoulder);
        let hip = snapshot.landmark(chain.hip);
        let knee = snapshot.landmark(chain.knee);
        let ankle = snapshot.landmark(chain.ankle);

        let threshold = self.config.visibility_threshold;
        if ![shoulder, hip, knee, ankle]
            .iter()
            .all(|landmark| landmark.is_visible(threshold))
        {
            return None;
        }

        Some(FeatureFrame {
            time,
            hip_y: hip.y,
            knee_y: knee.y,
            knee_x: knee.x,
            ankle_x: ankle.x,
            back_angle: calculate_angle(shoulder, hip, knee),
            side,
        })
    }
}
