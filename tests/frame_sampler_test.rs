// ABOUTME: Tests for the lazy frame sampler and its tick arithmetic
// ABOUTME: Validates tick counts, index-based timestamps, laziness, and decode error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::CountingClip;
use futures_util::StreamExt;
use movement_analysis::errors::AnalysisError;
use movement_analysis::models::TrimWindow;
use movement_analysis::providers::{tick_count, FrameSampler, VideoClip};

#[test]
fn test_tick_count_whole_seconds() {
    assert_eq!(tick_count(&TrimWindow::new(0.0, 1.0), 10.0), 10);
    assert_eq!(tick_count(&TrimWindow::new(2.0, 5.0), 10.0), 30);
}

#[test]
fn test_tick_count_ignores_float_noise() {
    // 0.3 * 10.0 is 3.0000000000000004 in binary floating point
    assert_eq!(tick_count(&TrimWindow::new(0.0, 0.3), 10.0), 3);
    assert_eq!(tick_count(&TrimWindow::new(0.1, 0.7), 10.0), 6);
}

#[test]
fn test_tick_count_partial_interval_rounds_up() {
    assert_eq!(tick_count(&TrimWindow::new(0.0, 0.25), 10.0), 3);
    assert_eq!(tick_count(&TrimWindow::new(0.0, 0.05), 10.0), 1);
}

#[test]
fn test_timestamps_computed_from_index() {
    let sampler = FrameSampler::new(TrimWindow::new(1.0, 2.0), 3.0).unwrap();
    assert_eq!(sampler.total_ticks(), 3);
    assert!((sampler.timestamp(0) - 1.0).abs() < f64::EPSILON);
    assert!((sampler.timestamp(2) - (1.0 + 2.0 / 3.0)).abs() < f64::EPSILON);

    let long = FrameSampler::new(TrimWindow::new(0.0, 600.0), 10.0).unwrap();
    assert!((long.timestamp(5_999) - 599.9).abs() < 1e-9);
    assert!(long.timestamp(long.total_ticks() - 1) < 600.0);
}

#[test]
fn test_rejects_bad_rate_and_window() {
    assert!(matches!(
        FrameSampler::new(TrimWindow::new(0.0, 1.0), 0.0),
        Err(AnalysisError::InvalidSamplingRate { .. })
    ));
    assert!(matches!(
        FrameSampler::new(TrimWindow::new(0.0, 1.0), f64::NAN),
        Err(AnalysisError::InvalidSamplingRate { .. })
    ));
    assert!(matches!(
        FrameSampler::new(TrimWindow::new(1.0, 0.0), 10.0),
        Err(AnalysisError::InvalidWindow { .. })
    ));
}

#[tokio::test]
async fn test_stream_yields_every_tick_in_order() {
    let clip = CountingClip::new(2.0);
    let sampler = FrameSampler::new(TrimWindow::new(0.5, 1.0), 10.0).unwrap();

    let frames: Vec<_> = sampler
        .sample(clip.open().await.unwrap())
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(frames.len(), 5);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.tick, i);
        assert!((frame.timestamp - sampler.timestamp(i)).abs() < f64::EPSILON);
    }
    assert_eq!(clip.live_handles(), 0);
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let clip = CountingClip::new(2.0);
    let sampler = FrameSampler::new(TrimWindow::new(0.0, 2.0), 10.0).unwrap();

    let stream = sampler.sample(clip.open().await.unwrap());
    assert!(clip.decoded_timestamps().is_empty());

    let first_two: Vec<_> = stream.take(2).collect().await;
    assert_eq!(first_two.len(), 2);
    assert_eq!(clip.decoded_timestamps().len(), 2);
    assert_eq!(clip.live_handles(), 0);
}

#[tokio::test]
async fn test_decode_error_ends_stream() {
    let clip = CountingClip::new(2.0).failing_from(0.3);
    let sampler = FrameSampler::new(TrimWindow::new(0.0, 1.0), 10.0).unwrap();

    let items: Vec<_> = sampler.sample(clip.open().await.unwrap()).collect().await;

    assert_eq!(items.len(), 4);
    assert!(items[..3].iter().all(Result::is_ok));
    assert!(matches!(items[3], Err(AnalysisError::Decode { .. })));
    assert_eq!(clip.live_handles(), 0);
}
