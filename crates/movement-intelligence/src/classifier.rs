// ABOUTME: Rule-based squat technique classifier over a time-ordered feature sequence
// ABOUTME: Finds the deepest frame and evaluates depth, spine, and knee travel predicates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Technique Classification
//!
//! The classifier looks at the whole sequence once: it locates the extremum
//! frame (deepest hip position) and evaluates independent predicates against
//! it and the first frame. Predicates are plain functions over a
//! [`MovementContext`] so rulesets for other movements can reuse or replace
//! them without touching the pipeline.

use tracing::debug;

use crate::catalog::MovementKind;
use crate::config::ClassifierThresholds;
use crate::errors::{AnalysisError, PipelineResult};
use crate::models::{AnalysisResult, FeatureFrame};

/// Shared inputs of every predicate
#[derive(Debug, Clone, Copy)]
pub struct MovementContext<'a> {
    /// Full time-ordered sequence
    pub sequence: &'a [FeatureFrame],
    /// Position of the extremum frame in `sequence`
    pub extremum_index: usize,
    /// Deepest frame of the movement
    pub extremum: &'a FeatureFrame,
}

impl<'a> MovementContext<'a> {
    /// Build the context, or `None` for an empty sequence
    #[must_use]
    pub fn new(sequence: &'a [FeatureFrame]) -> Option<Self> {
        let (extremum_index, extremum) = find_extremum(sequence)?;
        Some(Self {
            sequence,
            extremum_index,
            extremum,
        })
    }

    /// First frame of the window
    #[must_use]
    pub fn first(&self) -> &'a FeatureFrame {
        // Non-empty: an extremum exists
        &self.sequence[0]
    }
}

/// Frame with the largest `hip_y` (deepest point, `y` grows downward)
///
/// Ties keep the earliest frame.
#[must_use]
pub fn find_extremum(sequence: &[FeatureFrame]) -> Option<(usize, &FeatureFrame)> {
    sequence
        .iter()
        .enumerate()
        .reduce(|deepest, candidate| {
            if candidate.1.hip_y > deepest.1.hip_y {
                candidate
            } else {
                deepest
            }
        })
}

/// Whether timestamps are strictly increasing
#[must_use]
pub fn is_time_ordered(sequence: &[FeatureFrame]) -> bool {
    first_out_of_order(sequence).is_none()
}

/// First adjacent pair whose timestamps do not strictly increase
fn first_out_of_order(sequence: &[FeatureFrame]) -> Option<(f64, f64)> {
    sequence
        .windows(2)
        .find(|pair| pair[0].time >= pair[1].time || pair[1].time.is_nan())
        .map(|pair| (pair[0].time, pair[1].time))
}

/// Hip below knee height (plus the depth margin) at the deepest point
#[must_use]
pub fn depth_achieved(context: &MovementContext<'_>, thresholds: &ClassifierThresholds) -> bool {
    context.extremum.hip_y > context.extremum.knee_y + thresholds.depth_margin
}

/// Hip angle did not close by the closure limit or more between start and deepest point
#[must_use]
pub fn neutral_spine(context: &MovementContext<'_>, thresholds: &ClassifierThresholds) -> bool {
    let closure = context.first().back_angle - context.extremum.back_angle;
    closure < thresholds.spine_closure_max_degrees
}

/// Knee stays within the travel limit in front of the ankle at the deepest point
#[must_use]
pub fn controlled_knee_travel(
    context: &MovementContext<'_>,
    thresholds: &ClassifierThresholds,
) -> bool {
    context.extremum.knee_x - context.extremum.ankle_x < thresholds.knee_travel_max
}

/// Outcome of classifying one sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Depth criterion
    pub depth_achieved: bool,
    /// Spine criterion
    pub neutral_spine: bool,
    /// Knee travel criterion
    pub controlled_knee_travel: bool,
    /// Position of the extremum frame in the sequence
    pub extremum_index: usize,
    /// Timestamp of the extremum frame
    pub extremum_time: f64,
}

impl Classification {
    /// Attach the frame count to produce the public result
    #[must_use]
    pub const fn into_result(self, frames_analyzed: usize) -> AnalysisResult {
        AnalysisResult {
            depth_achieved: self.depth_achieved,
            neutral_spine: self.neutral_spine,
            controlled_knee_travel: self.controlled_knee_travel,
            frames_analyzed,
        }
    }
}

/// Classifier for one movement ruleset
#[derive(Debug, Clone, Copy)]
pub struct BiomechanicalClassifier {
    movement: MovementKind,
    thresholds: ClassifierThresholds,
}

impl BiomechanicalClassifier {
    /// Classifier for the given movement
    #[must_use]
    pub const fn for_movement(movement: MovementKind, thresholds: ClassifierThresholds) -> Self {
        Self {
            movement,
            thresholds,
        }
    }

    /// Movement this classifier evaluates
    #[must_use]
    pub const fn movement(&self) -> MovementKind {
        self.movement
    }

    /// Minimum sequence length accepted by [`classify`](Self::classify)
    #[must_use]
    pub const fn min_frames(&self) -> usize {
        self.thresholds.min_feature_frames
    }

    /// Classify a time-ordered feature sequence
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientData` when the sequence is shorter
    /// than the configured minimum; the classifier never guesses from fewer frames.
    /// Returns `AnalysisError::OutOfOrder` when timestamps do not strictly increase.
    pub fn classify(&self, sequence: &[FeatureFrame]) -> PipelineResult<Classification> {
        let required = self.min_frames();
        if sequence.len() < required {
            return Err(AnalysisError::InsufficientData {
                valid_frames: sequence.len(),
                required,
            });
        }
        if let Some((previous, current)) = first_out_of_order(sequence) {
            return Err(AnalysisError::OutOfOrder { previous, current });
        }

        let context = MovementContext::new(sequence).ok_or(AnalysisError::InsufficientData {
            valid_frames: 0,
            required,
        })?;

        let classification = match self.movement {
            MovementKind::SquatMvp => Classification {
                depth_achieved: depth_achieved(&context, &self.thresholds),
                neutral_spine: neutral_spine(&context, &self.thresholds),
                controlled_knee_travel: controlled_knee_travel(&context, &self.thresholds),
                extremum_index: context.extremum_index,
                extremum_time: context.extremum.time,
            },
        };

        debug!(
            movement = %self.movement,
            frames = sequence.len(),
            extremum_time = classification.extremum_time,
            depth = classification.depth_achieved,
            spine = classification.neutral_spine,
            knees = classification.controlled_knee_travel,
            "Classified movement"
        );
        Ok(classification)
    }
}
