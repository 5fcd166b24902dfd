// ABOUTME: Shared test utilities and fixtures for movement analysis integration tests
// ABOUTME: Provides pose builders, a scripted pose provider, and a leak-counting video clip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `movement_analysis`

use std::collections::HashSet;
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use movement_analysis::config::PipelineConfig;
use movement_analysis::constants::pose::LANDMARK_COUNT;
use movement_analysis::errors::{AnalysisError, PipelineResult};
use movement_analysis::models::{
    BodySide, DecodedImage, FeatureFrame, Landmark, PoseSnapshot, SampledFrame,
};
use movement_analysis::pipeline::{AnalysisPipeline, CancellationToken};
use movement_analysis::providers::{FrameDecoder, PoseProvider, VideoClip};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Pose fixtures
// ============================================================================

/// Geometry of one squat frame, in normalized image coordinates (y grows downward)
#[derive(Debug, Clone, Copy)]
pub struct SquatPose {
    pub hip_y: f64,
    pub knee_y: f64,
    pub knee_x: f64,
    pub ankle_x: f64,
    /// Desired shoulder-hip-knee angle in degrees
    pub back_angle: f64,
}

impl SquatPose {
    pub const fn new(hip_y: f64, knee_y: f64, knee_x: f64, ankle_x: f64, back_angle: f64) -> Self {
        Self {
            hip_y,
            knee_y,
            knee_x,
            ankle_x,
            back_angle,
        }
    }

    /// Standing posture: hip well above the knee, torso upright
    pub const fn standing() -> Self {
        Self::new(0.45, 0.65, 0.50, 0.47, 170.0)
    }
}

/// A landmark no detector would trust
pub const fn hidden_landmark() -> Landmark {
    Landmark::new(0.5, 0.5, 0.0, 0.0)
}

/// Snapshot with only `side`'s shoulder-hip-knee-ankle chain visible at `visibility`
pub fn squat_snapshot(pose: SquatPose, side: BodySide, visibility: f64) -> PoseSnapshot {
    let mut landmarks = vec![hidden_landmark(); LANDMARK_COUNT];
    let chain = side.chain();

    let hip_x = pose.knee_x - 0.15;
    let knee_angle = (pose.knee_y - pose.hip_y).atan2(pose.knee_x - hip_x);
    let shoulder_angle = knee_angle - pose.back_angle.to_radians();
    let shoulder_x = 0.3_f64.mul_add(shoulder_angle.cos(), hip_x);
    let shoulder_y = 0.3_f64.mul_add(shoulder_angle.sin(), pose.hip_y);

    landmarks[chain.shoulder.index()] = Landmark::new(shoulder_x, shoulder_y, 0.0, visibility);
    landmarks[chain.hip.index()] = Landmark::new(hip_x, pose.hip_y, 0.0, visibility);
    landmarks[chain.knee.index()] = Landmark::new(pose.knee_x, pose.knee_y, 0.0, visibility);
    landmarks[chain.ankle.index()] = Landmark::new(pose.ankle_x, 0.9, 0.0, visibility);

    PoseSnapshot::try_from(landmarks).unwrap()
}

/// Left-side snapshot with confident landmarks
pub fn visible_snapshot(pose: SquatPose) -> PoseSnapshot {
    squat_snapshot(pose, BodySide::Left, 0.95)
}

/// Feature frame built directly, for classifier tests
pub const fn feature(
    time: f64,
    hip_y: f64,
    knee_y: f64,
    knee_x: f64,
    ankle_x: f64,
    back_angle: f64,
) -> FeatureFrame {
    FeatureFrame {
        time,
        hip_y,
        knee_y,
        knee_x,
        ankle_x,
        back_angle,
        side: BodySide::Left,
    }
}

/// Ten ticks of a good squat: descend to below the knee and come back up
pub fn good_squat_track() -> Vec<Option<PoseSnapshot>> {
    let hips = [0.45, 0.52, 0.60, 0.66, 0.70, 0.69, 0.63, 0.56, 0.50, 0.45];
    let backs = [170.0, 168.0, 166.0, 164.0, 162.0, 162.0, 164.0, 166.0, 168.0, 170.0];
    hips.iter()
        .zip(backs)
        .map(|(&hip_y, back_angle)| {
            Some(visible_snapshot(SquatPose::new(
                hip_y, 0.65, 0.50, 0.46, back_angle,
            )))
        })
        .collect()
}

// ============================================================================
// Scripted pose provider
// ============================================================================

/// Pose provider returning a fixed pose per tick
pub struct ScriptedPoseProvider {
    poses: Vec<Option<PoseSnapshot>>,
    ready: bool,
    fail_at_tick: Option<usize>,
    cancel_at_tick: Option<(usize, CancellationToken)>,
    delay_ticks: HashSet<usize>,
    calls: AtomicUsize,
    seen_timestamps: Mutex<Vec<f64>>,
}

impl ScriptedPoseProvider {
    pub fn new(poses: Vec<Option<PoseSnapshot>>) -> Self {
        Self {
            poses,
            ready: true,
            fail_at_tick: None,
            cancel_at_tick: None,
            delay_ticks: HashSet::new(),
            calls: AtomicUsize::new(0),
            seen_timestamps: Mutex::new(Vec::new()),
        }
    }

    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn failing_at(mut self, tick: usize) -> Self {
        self.fail_at_tick = Some(tick);
        self
    }

    /// Cancel `token` while detecting `tick`
    pub fn cancelling_at(mut self, tick: usize, token: CancellationToken) -> Self {
        self.cancel_at_tick = Some((tick, token));
        self
    }

    /// Make the given ticks slow so that later ticks finish first
    pub fn slow_on(mut self, ticks: impl IntoIterator<Item = usize>) -> Self {
        self.delay_ticks = ticks.into_iter().collect();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_timestamps(&self) -> Vec<f64> {
        self.seen_timestamps.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoseProvider for ScriptedPoseProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn detect(&self, frame: &SampledFrame) -> PipelineResult<Option<PoseSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_timestamps.lock().unwrap().push(frame.timestamp);

        if self.delay_ticks.contains(&frame.tick) {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        if let Some((tick, token)) = &self.cancel_at_tick {
            if *tick == frame.tick {
                token.cancel();
            }
        }
        if self.fail_at_tick == Some(frame.tick) {
            return Err(AnalysisError::pose_estimation(
                frame.timestamp,
                "model crashed",
            ));
        }
        Ok(self.poses.get(frame.tick).cloned().flatten())
    }
}

// ============================================================================
// Leak-counting video clip
// ============================================================================

/// Clip whose decode handles count themselves while alive
pub struct CountingClip {
    duration: f64,
    fail_at_tick_time: Option<f64>,
    live: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
    decoded: Arc<Mutex<Vec<f64>>>,
}

impl CountingClip {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            fail_at_tick_time: None,
            live: Arc::new(AtomicUsize::new(0)),
            opened: Arc::new(AtomicUsize::new(0)),
            decoded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail decoding at the first timestamp at or after `timestamp`
    pub fn failing_from(mut self, timestamp: f64) -> Self {
        self.fail_at_tick_time = Some(timestamp);
        self
    }

    /// Decode handles currently alive
    pub fn live_handles(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Decode handles ever opened
    pub fn opened_handles(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn decoded_timestamps(&self) -> Vec<f64> {
        self.decoded.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoClip for CountingClip {
    fn duration(&self) -> f64 {
        self.duration
    }

    async fn open(&self) -> PipelineResult<Box<dyn FrameDecoder>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingDecoder {
            fail_at: self.fail_at_tick_time,
            live: Arc::clone(&self.live),
            decoded: Arc::clone(&self.decoded),
        }))
    }
}

/// Decode handle of [`CountingClip`]
pub struct CountingDecoder {
    fail_at: Option<f64>,
    live: Arc<AtomicUsize>,
    decoded: Arc<Mutex<Vec<f64>>>,
}

#[async_trait]
impl FrameDecoder for CountingDecoder {
    async fn seek_and_decode(&mut self, timestamp: f64) -> PipelineResult<DecodedImage> {
        if self.fail_at.is_some_and(|fail_at| timestamp >= fail_at - 1e-9) {
            return Err(AnalysisError::decode(timestamp, "corrupt frame"));
        }
        self.decoded.lock().unwrap().push(timestamp);
        Ok(DecodedImage::default())
    }
}

impl Drop for CountingDecoder {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Pipeline helpers
// ============================================================================

/// Pipeline with default configuration over `provider`
pub fn pipeline_with(provider: Arc<dyn PoseProvider>) -> AnalysisPipeline {
    init_test_logging();
    AnalysisPipeline::new(PipelineConfig::default())
        .unwrap()
        .with_pose_provider(provider)
}
