// ABOUTME: Tests for the squat technique classifier and its composable criteria
// ABOUTME: Covers the depth, spine, and knee travel criteria plus the minimum-data and ordering gates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::feature;
use movement_analysis::catalog::MovementKind;
use movement_analysis::errors::{AnalysisError, ConfigError};
use movement_analysis::intelligence::{
    controlled_knee_travel, depth_achieved, find_extremum, is_time_ordered, neutral_spine,
    BiomechanicalClassifier, ClassifierThresholds, MovementContext,
};
use movement_analysis::models::FeatureFrame;

fn squat_classifier() -> BiomechanicalClassifier {
    BiomechanicalClassifier::for_movement(MovementKind::SquatMvp, ClassifierThresholds::default())
}

/// Five-frame descent whose deepest frame is `deepest`
fn descent_to(deepest: FeatureFrame) -> Vec<FeatureFrame> {
    let mut frames: Vec<FeatureFrame> = (0..4)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            feature(t, 0.40 + 0.02 * f64::from(i), 0.65, 0.48, 0.46, 170.0)
        })
        .collect();
    frames.push(FeatureFrame {
        time: 0.4,
        ..deepest
    });
    frames
}

// === Checklist criteria ===

#[test]
fn test_hip_below_knee_reaches_depth() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(classification.depth_achieved);
    assert_eq!(classification.extremum_index, 4);
}

#[test]
fn test_hip_above_knee_misses_depth() {
    let mut sequence = descent_to(feature(0.0, 0.55, 0.65, 0.50, 0.47, 165.0));
    // Keep the earlier frames shallower than the extremum
    for frame in &mut sequence[..4] {
        frame.hip_y = 0.45;
    }
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert_eq!(classification.extremum_index, 4);
    assert!(!classification.depth_achieved);
}

#[test]
fn test_large_hip_closure_fails_spine() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 145.0));
    assert!((sequence[0].back_angle - 170.0).abs() < f64::EPSILON);
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(!classification.neutral_spine);
}

#[test]
fn test_small_knee_lead_is_controlled() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.45, 165.0));
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(classification.controlled_knee_travel);
}

#[test]
fn test_knee_travel_fail() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.56, 0.45, 165.0));
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(!classification.controlled_knee_travel);
}

#[test]
fn test_spine_pass_with_small_closure() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 155.0));
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(classification.neutral_spine);
}

#[test]
fn test_spine_closure_of_exactly_threshold_fails() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 150.0));
    let classification = squat_classifier().classify(&sequence).unwrap();
    assert!(!classification.neutral_spine);
}

#[test]
fn test_result_carries_frame_count() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));
    let result = squat_classifier().classify(&sequence).unwrap().into_result(7);
    assert_eq!(result.frames_analyzed, 7);
    assert!(result.passed_all());
}

// === Minimum data ===

#[test]
fn test_four_frames_are_insufficient() {
    let sequence: Vec<_> = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0))
        .into_iter()
        .skip(1)
        .collect();
    assert_eq!(sequence.len(), 4);

    let error = squat_classifier().classify(&sequence).unwrap_err();
    assert_eq!(
        error,
        AnalysisError::InsufficientData {
            valid_frames: 4,
            required: 5
        }
    );
}

#[test]
fn test_empty_sequence_is_insufficient() {
    let error = squat_classifier().classify(&[]).unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::InsufficientData {
            valid_frames: 0,
            ..
        }
    ));
}

#[test]
fn test_raised_minimum_is_honored() {
    let thresholds = ClassifierThresholds {
        min_feature_frames: 8,
        ..ClassifierThresholds::default()
    };
    let classifier = BiomechanicalClassifier::for_movement(MovementKind::SquatMvp, thresholds);
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));

    assert_eq!(classifier.min_frames(), 8);
    assert!(matches!(
        classifier.classify(&sequence),
        Err(AnalysisError::InsufficientData { required: 8, .. })
    ));
}

#[test]
fn test_minimum_cannot_go_below_five() {
    let thresholds = ClassifierThresholds {
        min_feature_frames: 4,
        ..ClassifierThresholds::default()
    };
    assert!(matches!(
        thresholds.validate(),
        Err(ConfigError::ValidationFailed(_))
    ));
}

// === Extremum and predicates ===

#[test]
fn test_extremum_ties_resolve_to_earliest() {
    let sequence = vec![
        feature(0.0, 0.50, 0.65, 0.5, 0.46, 170.0),
        feature(0.1, 0.70, 0.65, 0.5, 0.46, 160.0),
        feature(0.2, 0.70, 0.65, 0.6, 0.46, 150.0),
        feature(0.3, 0.60, 0.65, 0.5, 0.46, 165.0),
    ];
    let (index, frame) = find_extremum(&sequence).unwrap();
    assert_eq!(index, 1);
    assert!((frame.time - 0.1).abs() < f64::EPSILON);
}

#[test]
fn test_predicates_compose_over_shared_context() {
    let sequence = descent_to(feature(0.0, 0.70, 0.65, 0.60, 0.45, 140.0));
    let context = MovementContext::new(&sequence).unwrap();
    let thresholds = ClassifierThresholds::default();

    assert_eq!(context.extremum_index, 4);
    assert!((context.first().back_angle - 170.0).abs() < f64::EPSILON);
    assert!(depth_achieved(&context, &thresholds));
    assert!(!neutral_spine(&context, &thresholds));
    assert!(!controlled_knee_travel(&context, &thresholds));
}

#[test]
fn test_depth_margin_tightens_depth() {
    let sequence = descent_to(feature(0.0, 0.67, 0.65, 0.50, 0.47, 165.0));
    let context = MovementContext::new(&sequence).unwrap();
    let strict = ClassifierThresholds {
        depth_margin: 0.05,
        ..ClassifierThresholds::default()
    };
    assert!(depth_achieved(&context, &ClassifierThresholds::default()));
    assert!(!depth_achieved(&context, &strict));
}

#[test]
fn test_context_requires_frames() {
    assert!(MovementContext::new(&[]).is_none());
}

#[test]
fn test_time_ordering_check() {
    let ordered = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));
    assert!(is_time_ordered(&ordered));

    let mut swapped = ordered;
    swapped.swap(1, 2);
    assert!(!is_time_ordered(&swapped));
}

#[test]
fn test_unordered_sequence_is_rejected() {
    let mut sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));
    sequence.swap(1, 2);

    let error = squat_classifier().classify(&sequence).unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::OutOfOrder { previous, current }
            if (previous - 0.2).abs() < 1e-9 && (current - 0.1).abs() < 1e-9
    ));
}

#[test]
fn test_repeated_timestamp_is_rejected() {
    let mut sequence = descent_to(feature(0.0, 0.70, 0.65, 0.50, 0.47, 165.0));
    sequence[3].time = sequence[2].time;

    assert!(matches!(
        squat_classifier().classify(&sequence),
        Err(AnalysisError::OutOfOrder { .. })
    ));
}

#[test]
fn test_default_thresholds_match_historical_values() {
    let thresholds = ClassifierThresholds::default();
    assert_eq!(thresholds.min_feature_frames, 5);
    assert!((thresholds.spine_closure_max_degrees - 20.0).abs() < f64::EPSILON);
    assert!((thresholds.knee_travel_max - 0.08).abs() < f64::EPSILON);
    assert!(thresholds.depth_margin.abs() < f64::EPSILON);
    assert!(thresholds.validate().is_ok());
}
