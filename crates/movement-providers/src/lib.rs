// ABOUTME: Collaborator interfaces and frame sampling for the movement analysis pipeline
// ABOUTME: Video clip and pose provider traits, lazy frame streams, and recorded-session replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Collaborator interfaces of the analyzer and the frame sampler.
//!
//! The pipeline never talks to a concrete decoder or pose model: it depends on
//! [`VideoClip`] / [`FrameDecoder`] for frames and on [`PoseProvider`] for
//! landmarks. The [`replay`] module implements both over a recorded pose
//! track, for offline analysis and deterministic tests.

// Re-export movement-core modules so collaborators can keep `use crate::models::*`
pub use movement_core::constants;
pub use movement_core::errors;
pub use movement_core::models;

/// Lazy frame sampling over a trim window
pub mod frame_sampler;
/// Pose estimation collaborator interface
pub mod pose;
/// Replay collaborators backed by a recorded pose track
pub mod replay;
/// Video decoding collaborator interfaces
pub mod video;

pub use frame_sampler::{tick_count, FrameSampler, FrameStream};
pub use pose::PoseProvider;
pub use replay::{
    PoseRecording, RecordedPose, RecordingClip, RecordingError, RecordingPoseProvider,
};
pub use video::{FrameDecoder, VideoClip};
