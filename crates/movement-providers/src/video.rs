// ABOUTME: Video clip and frame decoder traits consumed by the frame sampler
// ABOUTME: Decode handles are exclusive and released by dropping them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::errors::PipelineResult;
use crate::models::DecodedImage;

/// A decodable video owned by the caller
///
/// The pipeline borrows the clip for one run and opens exactly one
/// [`FrameDecoder`] on it.
#[async_trait]
pub trait VideoClip: Send + Sync {
    /// Total duration in seconds
    fn duration(&self) -> f64;

    /// Acquire a decode handle positioned at the start of the clip
    ///
    /// The handle is released when dropped, so implementations should free
    /// native resources in `Drop`.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Decode` if the video cannot be opened
    async fn open(&self) -> PipelineResult<Box<dyn FrameDecoder>>;
}

/// Exclusive decode cursor over a clip
#[async_trait]
pub trait FrameDecoder: Send {
    /// Seek to `timestamp` seconds and decode the frame shown there
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Decode` if seeking or decoding fails
    async fn seek_and_decode(&mut self, timestamp: f64) -> PipelineResult<DecodedImage>;
}
