// ABOUTME: Body landmark topology and pose snapshot types produced by pose estimation
// ABOUTME: Validates snapshot shape and exposes left/right joint chains for feature extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::pose::LANDMARK_COUNT;

/// Side of the body a joint chain belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    /// Athlete's left side
    Left,
    /// Athlete's right side
    Right,
}

impl BodySide {
    /// Lowercase name, matching the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Shoulder, hip, knee, and ankle landmarks of this side
    #[must_use]
    pub const fn chain(self) -> SideChain {
        match self {
            Self::Left => SideChain {
                shoulder: BodyLandmark::LeftShoulder,
                hip: BodyLandmark::LeftHip,
                knee: BodyLandmark::LeftKnee,
                ankle: BodyLandmark::LeftAnkle,
            },
            Self::Right => SideChain {
                shoulder: BodyLandmark::RightShoulder,
                hip: BodyLandmark::RightHip,
                knee: BodyLandmark::RightKnee,
                ankle: BodyLandmark::RightAnkle,
            },
        }
    }
}

/// Anatomical landmarks used by the analyzer, valued by their index in the
/// 33-point body topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLandmark {
    /// Left shoulder
    LeftShoulder = 11,
    /// Right shoulder
    RightShoulder = 12,
    /// Left hip
    LeftHip = 23,
    /// Right hip
    RightHip = 24,
    /// Left knee
    LeftKnee = 25,
    /// Right knee
    RightKnee = 26,
    /// Left ankle
    LeftAnkle = 27,
    /// Right ankle
    RightAnkle = 28,
}

impl BodyLandmark {
    /// Position of this landmark in a snapshot
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The four joints of one body side required by the squat features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideChain {
    /// Shoulder joint
    pub shoulder: BodyLandmark,
    /// Hip joint (vertex of the back angle)
    pub hip: BodyLandmark,
    /// Knee joint
    pub knee: BodyLandmark,
    /// Ankle joint
    pub ankle: BodyLandmark,
}

/// A single detected body joint
///
/// `x` and `y` are normalized to the frame (`[0, 1]`, `y` grows downward),
/// `z` is the model's relative depth, `visibility` its confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized
    pub x: f64,
    /// Vertical position, normalized, growing downward
    pub y: f64,
    /// Relative depth, unused by the 2D features
    #[serde(default)]
    pub z: f64,
    /// Detection confidence
    pub visibility: f64,
}

impl Landmark {
    /// Create a landmark
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Whether the landmark's confidence strictly exceeds `threshold` and its
    /// coordinates are usable
    #[must_use]
    pub fn is_visible(&self, threshold: f64) -> bool {
        self.visibility > threshold && self.x.is_finite() && self.y.is_finite()
    }
}

/// Snapshot with a landmark count other than the body topology's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Pose snapshot has {found} landmarks, expected {LANDMARK_COUNT}")]
pub struct SnapshotShapeError {
    /// Number of landmarks received
    pub found: usize,
}

/// Every landmark detected for the single tracked person in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct PoseSnapshot {
    landmarks: Vec<Landmark>,
}

impl PoseSnapshot {
    /// Landmark at an anatomical position
    #[must_use]
    pub fn landmark(&self, landmark: BodyLandmark) -> &Landmark {
        // Length is checked on construction
        &self.landmarks[landmark.index()]
    }

    /// All landmarks in topology order
    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl TryFrom<Vec<Landmark>> for PoseSnapshot {
    type Error = SnapshotShapeError;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self, Self::Error> {
        if landmarks.len() == LANDMARK_COUNT {
            Ok(Self { landmarks })
        } else {
            Err(SnapshotShapeError {
                found: landmarks.len(),
            })
        }
    }
}

impl From<PoseSnapshot> for Vec<Landmark> {
    fn from(snapshot: PoseSnapshot) -> Self {
        snapshot.landmarks
    }
}
