// ABOUTME: Analysis pipeline orchestrating sampling, pose detection, feature extraction, and classification
// ABOUTME: Drives a caller-owned run through its states with progress, cancellation, and RAII decode handles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analysis Pipeline
//!
//! One call to [`AnalysisPipeline::execute`] analyzes one trim window of one
//! clip. Frames are pulled from the sampler one tick at a time, passed through
//! the pose provider and the feature extractor, and only the resulting feature
//! frames are kept. Once the window is exhausted the classifier runs once.
//!
//! The decode handle is opened after the inputs are validated and dropped
//! before `execute` returns, whichever way the run ends.

mod cancellation;
mod progress;
mod state;

use std::str::FromStr;
use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info, instrument, trace, warn};

pub use cancellation::CancellationToken;
pub use progress::{AnalysisProgress, ProgressSender};
pub use state::{AnalysisRun, PipelineState, StateTransition};

use progress::ProgressReporter;

use crate::catalog::MovementKind;
use crate::config::PipelineConfig;
use crate::errors::{AnalysisError, ConfigError, PipelineResult};
use crate::intelligence::{BiomechanicalClassifier, FeatureExtractor};
use crate::models::{AnalysisResult, FeatureFrame, TrimWindow};
use crate::providers::{FrameDecoder, FrameSampler, PoseProvider, VideoClip};

/// Inputs of one analysis
pub struct AnalysisRequest<'a> {
    clip: &'a dyn VideoClip,
    movement_id: String,
    window: TrimWindow,
    sample_rate_hz: Option<f64>,
    cancellation: CancellationToken,
    progress: Option<ProgressSender>,
}

impl<'a> AnalysisRequest<'a> {
    /// Analyze `window` of `clip` against the movement with spec id `movement_id`
    #[must_use]
    pub fn new(clip: &'a dyn VideoClip, movement_id: impl Into<String>, window: TrimWindow) -> Self {
        Self {
            clip,
            movement_id: movement_id.into(),
            window,
            sample_rate_hz: None,
            cancellation: CancellationToken::new(),
            progress: None,
        }
    }

    /// Override the configured sampling rate for this request
    #[must_use]
    pub const fn with_sample_rate(mut self, rate_hz: f64) -> Self {
        self.sample_rate_hz = Some(rate_hz);
        self
    }

    /// Observe `token` between ticks
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Send progress updates to `sender`
    #[must_use]
    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Movement spec id requested
    #[must_use]
    pub fn movement_id(&self) -> &str {
        &self.movement_id
    }

    /// Trim window requested
    #[must_use]
    pub const fn window(&self) -> TrimWindow {
        self.window
    }
}

/// Validated inputs, ready to sample
struct RunPlan {
    provider: Arc<dyn PoseProvider>,
    classifier: BiomechanicalClassifier,
    sampler: FrameSampler,
}

/// Squat technique analyzer over a pose provider
#[derive(Clone)]
pub struct AnalysisPipeline {
    config: PipelineConfig,
    extractor: FeatureExtractor,
    pose_provider: Option<Arc<dyn PoseProvider>>,
}

impl AnalysisPipeline {
    /// Create a pipeline without a pose provider
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            extractor: FeatureExtractor::new(config.extraction),
            pose_provider: None,
        })
    }

    /// Attach the pose provider used for every run
    #[must_use]
    pub fn with_pose_provider(mut self, provider: Arc<dyn PoseProvider>) -> Self {
        self.pose_provider = Some(provider);
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the analysis described by `request`, driving `run` to a terminal state
    ///
    /// Re-running the same request on a fresh run recomputes the result from
    /// scratch; nothing is cached between runs.
    ///
    /// # Errors
    ///
    /// - `Configuration` if no ready pose provider is attached or `run` was already used
    /// - `UnsupportedMovement`, `InvalidWindow` or `InvalidSamplingRate` for bad inputs,
    ///   before any frame is decoded
    /// - `Decode` or `PoseEstimation` if a collaborator fails, without retry
    /// - `InsufficientData` if fewer valid frames than required were found, without classifying
    /// - `OutOfOrder` if detections come back out of timestamp order
    /// - `Cancelled` if the request's token was cancelled between two ticks
    #[instrument(
        skip_all,
        fields(run_id = %run.id(), movement = %request.movement_id)
    )]
    pub async fn execute(
        &self,
        run: &mut AnalysisRun,
        request: AnalysisRequest<'_>,
    ) -> PipelineResult<AnalysisResult> {
        if run.state() != PipelineState::Idle {
            return Err(AnalysisError::configuration(format!(
                "analysis run {} was already executed (state: {})",
                run.id(),
                run.state()
            )));
        }

        let outcome = self.drive(run, request).await;

        match &outcome {
            Ok(result) => {
                run.transition(PipelineState::Completed);
                info!(
                    frames_analyzed = result.frames_analyzed,
                    depth = result.depth_achieved,
                    spine = result.neutral_spine,
                    knees = result.controlled_knee_travel,
                    "Movement analysis completed"
                );
            }
            Err(error @ AnalysisError::Cancelled { .. }) => {
                run.transition(PipelineState::Cancelled);
                info!(%error, "Movement analysis cancelled");
            }
            Err(error) => {
                run.transition(PipelineState::Failed);
                warn!(%error, category = ?error.category(), "Movement analysis failed");
            }
        }
        outcome
    }

    async fn drive(
        &self,
        run: &mut AnalysisRun,
        request: AnalysisRequest<'_>,
    ) -> PipelineResult<AnalysisResult> {
        let plan = self.plan(&request)?;
        let AnalysisRequest {
            clip,
            cancellation,
            progress,
            ..
        } = request;

        let total_ticks = plan.sampler.total_ticks();
        run.plan_ticks(total_ticks);
        run.transition(PipelineState::Sampling);
        info!(
            provider = plan.provider.name(),
            start = plan.sampler.window().start,
            end = plan.sampler.window().end,
            rate_hz = plan.sampler.rate_hz(),
            total_ticks,
            "Movement analysis started"
        );

        let mut reporter = ProgressReporter::new(progress);
        reporter.report(0, total_ticks);

        let decoder = clip.open().await?;
        let features = self
            .extract_features(run, &plan, decoder, &cancellation, &mut reporter)
            .await?;

        let required = plan.classifier.min_frames();
        if features.len() < required {
            return Err(AnalysisError::InsufficientData {
                valid_frames: features.len(),
                required,
            });
        }

        run.transition(PipelineState::Classifying);
        let classification = plan.classifier.classify(&features)?;
        Ok(classification.into_result(features.len()))
    }

    /// Validate everything that can be checked without decoding a frame
    fn plan(&self, request: &AnalysisRequest<'_>) -> PipelineResult<RunPlan> {
        let provider = self
            .pose_provider
            .clone()
            .ok_or_else(|| AnalysisError::configuration("no pose provider configured"))?;
        if !provider.is_ready() {
            return Err(AnalysisError::configuration(format!(
                "pose provider '{}' is not ready",
                provider.name()
            )));
        }

        let movement = MovementKind::from_str(&request.movement_id)?;
        request.window.validate_within(request.clip.duration())?;
        let rate_hz = request
            .sample_rate_hz
            .unwrap_or(self.config.sample_rate_hz);
        let sampler = FrameSampler::new(request.window, rate_hz)?;

        Ok(RunPlan {
            provider,
            classifier: BiomechanicalClassifier::for_movement(movement, self.config.thresholds),
            sampler,
        })
    }

    /// Pull every tick through detection and extraction, keeping valid feature frames
    ///
    /// The frame stream owns the decoder; it is dropped when this returns.
    async fn extract_features(
        &self,
        run: &mut AnalysisRun,
        plan: &RunPlan,
        decoder: Box<dyn FrameDecoder>,
        cancellation: &CancellationToken,
        reporter: &mut ProgressReporter,
    ) -> PipelineResult<Vec<FeatureFrame>> {
        let total_ticks = plan.sampler.total_ticks();
        let provider = &plan.provider;
        let mut detections = plan
            .sampler
            .sample(decoder)
            .map(|frame| {
                let provider = Arc::clone(provider);
                async move {
                    let frame = frame?;
                    let snapshot = provider.detect(&frame).await?;
                    Ok::<_, AnalysisError>((frame.tick, frame.timestamp, snapshot))
                }
            })
            .buffered(self.config.extraction_concurrency);

        let mut features = Vec::with_capacity(total_ticks);
        let mut last_timestamp: Option<f64> = None;
        loop {
            if cancellation.is_cancelled() {
                return Err(AnalysisError::Cancelled {
                    ticks_completed: run.ticks_completed(),
                    total_ticks,
                });
            }
            let Some(detection) = detections.next().await else {
                break;
            };
            let (tick, timestamp, snapshot) = detection?;
            if let Some(previous) = last_timestamp.filter(|previous| *previous >= timestamp) {
                return Err(AnalysisError::OutOfOrder {
                    previous,
                    current: timestamp,
                });
            }
            last_timestamp = Some(timestamp);

            if run.state() == PipelineState::Sampling {
                run.transition(PipelineState::Extracting);
            }

            match snapshot.and_then(|pose| self.extractor.extract(&pose, timestamp)) {
                Some(frame) => features.push(frame),
                None => trace!(tick, timestamp, "Frame discarded, no fully visible side"),
            }

            let ticks_completed = run.complete_tick();
            reporter.report(ticks_completed, total_ticks);
            debug!(
                tick,
                timestamp,
                valid_frames = features.len(),
                "Processed tick"
            );
        }

        Ok(features)
    }
}
