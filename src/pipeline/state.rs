// ABOUTME: Analysis run state machine owned by the caller across one pipeline execution
// ABOUTME: Enforces forward-only transitions and keeps a timestamped transition history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Lifecycle stage of an analysis run
///
/// ```text
/// Idle -> Sampling -> Extracting -> Classifying -> Completed
///   \________\___________\_____________\-------> Failed | Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Created, nothing validated yet
    Idle,
    /// Inputs accepted, waiting for the first frame
    Sampling,
    /// Frames flowing through pose detection and feature extraction
    Extracting,
    /// Sampling exhausted, classifier running
    Classifying,
    /// Result produced
    Completed,
    /// Stopped on an error
    Failed,
    /// Stopped on request
    Cancelled,
}

impl PipelineState {
    /// Whether no further transition is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Whether `self -> next` is a legal forward transition
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Sampling | Self::Failed)
                | (Self::Sampling, Self::Extracting)
                | (Self::Extracting, Self::Classifying)
                | (Self::Classifying, Self::Completed)
                | (
                    Self::Sampling | Self::Extracting | Self::Classifying,
                    Self::Failed | Self::Cancelled
                )
        )
    }

    /// Lowercase name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sampling => "sampling",
            Self::Extracting => "extracting",
            Self::Classifying => "classifying",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// State left
    pub from: PipelineState,
    /// State entered
    pub to: PipelineState,
    /// When the transition was applied
    pub at: DateTime<Utc>,
}

/// Caller-owned record of one pipeline execution
///
/// A run is single use: the pipeline refuses a run that has left `Idle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    id: Uuid,
    state: PipelineState,
    total_ticks: usize,
    ticks_completed: usize,
    created_at: DateTime<Utc>,
    transitions: Vec<StateTransition>,
}

impl Default for AnalysisRun {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRun {
    /// A fresh run in `Idle`
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: PipelineState::Idle,
            total_ticks: 0,
            ticks_completed: 0,
            created_at: Utc::now(),
            transitions: Vec::new(),
        }
    }

    /// Run identifier used in logs
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Ticks planned for the trim window, 0 until sampling starts
    #[must_use]
    pub const fn total_ticks(&self) -> usize {
        self.total_ticks
    }

    /// Ticks processed so far
    #[must_use]
    pub const fn ticks_completed(&self) -> usize {
        self.ticks_completed
    }

    /// When the run was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applied transitions in order
    #[must_use]
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Whether the run reached a terminal state
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Move to `next`; an illegal transition is logged and ignored
    ///
    /// Returns whether the transition was applied.
    pub fn transition(&mut self, next: PipelineState) -> bool {
        if !self.state.can_transition_to(next) {
            warn!(
                run_id = %self.id,
                from = %self.state,
                to = %next,
                "Rejected invalid pipeline state transition"
            );
            return false;
        }

        debug!(run_id = %self.id, from = %self.state, to = %next, "Pipeline state transition");
        self.transitions.push(StateTransition {
            from: self.state,
            to: next,
            at: Utc::now(),
        });
        self.state = next;
        true
    }

    pub(crate) fn plan_ticks(&mut self, total_ticks: usize) {
        self.total_ticks = total_ticks;
        self.ticks_completed = 0;
    }

    pub(crate) fn complete_tick(&mut self) -> usize {
        self.ticks_completed += 1;
        self.ticks_completed
    }
}
