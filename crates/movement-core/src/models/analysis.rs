// ABOUTME: Analysis result checklist and the persisted analysis record with its run status
// ABOUTME: Serializes results to the flat key layout stored alongside uploaded videos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::{AnalysisError, PipelineResult};

/// Technique checklist produced by one successful run
///
/// The serialized keys are the ones stored with existing analysis records
/// and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Hip descended below knee height at the deepest point
    #[serde(rename = "profondeur_atteinte")]
    pub depth_achieved: bool,
    /// Hip angle did not close excessively on the way down
    #[serde(rename = "dos_neutre")]
    pub neutral_spine: bool,
    /// Knee did not travel too far past the ankle at the deepest point
    #[serde(rename = "avancee_genoux_controlee")]
    pub controlled_knee_travel: bool,
    /// Number of frames that produced usable features
    #[serde(rename = "framesAnalyzed")]
    pub frames_analyzed: usize,
}

/// One line of the checklist shown in the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriterionOutcome {
    /// Serialized key of the criterion
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Whether the criterion passed
    pub passed: bool,
}

impl AnalysisResult {
    /// Checklist lines in report order
    #[must_use]
    pub const fn criteria(&self) -> [CriterionOutcome; 3] {
        [
            CriterionOutcome {
                key: "profondeur_atteinte",
                label: "Depth achieved",
                passed: self.depth_achieved,
            },
            CriterionOutcome {
                key: "dos_neutre",
                label: "Neutral spine (no butt wink)",
                passed: self.neutral_spine,
            },
            CriterionOutcome {
                key: "avancee_genoux_controlee",
                label: "Controlled knee travel",
                passed: self.controlled_knee_travel,
            },
        ]
    }

    /// Whether every criterion passed
    #[must_use]
    pub const fn passed_all(&self) -> bool {
        self.depth_achieved && self.neutral_spine && self.controlled_knee_travel
    }
}

/// Run status persisted with the video reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    /// Analysis is running
    Pending,
    /// Analysis finished, result attached
    Completed,
    /// Analysis failed, message attached
    Error,
    /// Caller stopped the run
    Cancelled,
}

/// Analysis log entry a caller persists for an uploaded video
///
/// Created as `PENDING` before the run and resolved exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Record identifier
    pub id: Uuid,
    /// Display name of the analyzed movement
    pub exercise_name: String,
    /// Where the uploaded video is stored
    pub video_url: String,
    /// Current status
    pub analysis_status: AnalysisStatus,
    /// Result, present only when completed
    pub result_json: Option<AnalysisResult>,
    /// User-facing failure message, present only on error
    pub error_message: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Resolution time
    pub completed_at: Option<DateTime<Utc>>,
    /// Whether the athlete shared the result with their coach
    pub shared_with_coach: bool,
}

impl AnalysisRecord {
    /// Create a pending record for a run about to start
    #[must_use]
    pub fn pending(exercise_name: impl Into<String>, video_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_name: exercise_name.into(),
            video_url: video_url.into(),
            analysis_status: AnalysisStatus::Pending,
            result_json: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
            shared_with_coach: false,
        }
    }

    /// Whether the record left the pending state
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.analysis_status != AnalysisStatus::Pending
    }

    /// Record the outcome of the run
    ///
    /// Returns `false` and leaves the record untouched if it was already resolved.
    pub fn resolve(&mut self, outcome: &PipelineResult<AnalysisResult>) -> bool {
        if self.is_resolved() {
            warn!(
                record_id = %self.id,
                status = ?self.analysis_status,
                "Ignoring second resolution of analysis record"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                self.analysis_status = AnalysisStatus::Completed;
                self.result_json = Some(*result);
            }
            Err(AnalysisError::Cancelled { .. }) => {
                self.analysis_status = AnalysisStatus::Cancelled;
            }
            Err(error) => {
                self.analysis_status = AnalysisStatus::Error;
                self.error_message = Some(error.user_message());
            }
        }
        self.completed_at = Some(Utc::now());
        true
    }

    /// Share a completed analysis with the coach
    ///
    /// Returns `false` when there is no completed result to share.
    pub fn share_with_coach(&mut self) -> bool {
        if self.analysis_status != AnalysisStatus::Completed {
            return false;
        }
        self.shared_with_coach = true;
        true
    }
}
