// ABOUTME: Lazy frame sampler producing decoded frames at a fixed rate over a trim window
// ABOUTME: Implements a single-pass Stream that owns the decode handle and drops it when done
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Frame Sampler
//!
//! Frames are pulled one at a time: nothing is decoded until the consumer
//! polls the stream, and at most one decoded frame is held by the sampler.
//!
//! Tick `i` is shown at `start + i / rate_hz`. The timestamp is computed from
//! the tick index rather than accumulated, so long windows do not drift.
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use movement_providers::{FrameSampler, VideoClip};
//! use movement_providers::models::TrimWindow;
//!
//! async fn count_frames(clip: &dyn VideoClip) -> usize {
//!     let sampler = FrameSampler::new(TrimWindow::new(0.0, 2.0), 10.0).unwrap();
//!     let decoder = clip.open().await.unwrap();
//!     sampler.sample(decoder).filter_map(|f| async { f.ok() }).count().await
//! }
//! ```

use std::pin::Pin;

use async_stream::try_stream;
use futures_util::Stream;
use tracing::trace;

use crate::constants::sampling::TICK_EPSILON;
use crate::errors::{AnalysisError, PipelineResult};
use crate::models::{SampledFrame, TrimWindow};
use crate::video::FrameDecoder;

/// Stream of sampled frames returned by [`FrameSampler::sample`]
pub type FrameStream<'a> = Pin<Box<dyn Stream<Item = PipelineResult<SampledFrame>> + Send + 'a>>;

/// Number of ticks needed to cover `window` at `rate_hz`
///
/// `ceil(length * rate_hz)` with a small tolerance so that products like
/// `0.3 * 10.0 = 3.0000000000000004` do not produce a spurious extra tick.
/// A non-empty window always yields at least one tick.
#[must_use]
pub fn tick_count(window: &TrimWindow, rate_hz: f64) -> usize {
    let exact = window.length() * rate_hz;
    (exact - TICK_EPSILON).ceil().max(1.0) as usize
}

/// Sampling plan for one trim window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSampler {
    window: TrimWindow,
    rate_hz: f64,
    total_ticks: usize,
}

impl FrameSampler {
    /// Validate the window shape and sampling rate
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidSamplingRate` if `rate_hz` is not a
    /// positive finite number, or `AnalysisError::InvalidWindow` if the
    /// window is empty, reversed, negative or non-finite
    pub fn new(window: TrimWindow, rate_hz: f64) -> PipelineResult<Self> {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(AnalysisError::InvalidSamplingRate { rate_hz });
        }
        window.validate_shape()?;

        Ok(Self {
            window,
            rate_hz,
            total_ticks: tick_count(&window, rate_hz),
        })
    }

    /// The window being sampled
    #[must_use]
    pub const fn window(&self) -> TrimWindow {
        self.window
    }

    /// Sampling rate in Hz
    #[must_use]
    pub const fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    /// Number of frames the stream will yield when nothing fails
    #[must_use]
    pub const fn total_ticks(&self) -> usize {
        self.total_ticks
    }

    /// Timestamp in seconds of tick `tick`
    #[must_use]
    pub fn timestamp(&self, tick: usize) -> f64 {
        self.window.start + tick as f64 / self.rate_hz
    }

    /// Consume the sampler and a decode handle into a lazy frame stream
    ///
    /// The stream ends after the last tick or right after the first decode
    /// error, which it yields. Dropping the stream drops the decoder.
    pub fn sample<'a>(self, mut decoder: Box<dyn FrameDecoder + 'a>) -> FrameStream<'a> {
        Box::pin(try_stream! {
            for tick in 0..self.total_ticks {
                let timestamp = self.timestamp(tick);
                let image = decoder.seek_and_decode(timestamp).await?;
                trace!(tick, timestamp, width = image.width, height = image.height, "Decoded frame");
                yield SampledFrame { tick, timestamp, image };
            }
        })
    }
}
