// ABOUTME: Progress updates emitted while an analysis samples and processes frames
// ABOUTME: Delivered fire-and-forget over an unbounded channel so a slow or gone listener never blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

/// Sending half handed to the pipeline by the caller
pub type ProgressSender = UnboundedSender<AnalysisProgress>;

/// Completion of a running analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisProgress {
    /// `round(100 * ticks_completed / total_ticks)`, within `0..=100`
    pub percent: u8,
    /// Ticks fully processed so far
    pub ticks_completed: usize,
    /// Ticks in the trim window
    pub total_ticks: usize,
}

impl AnalysisProgress {
    /// Progress after `ticks_completed` of `total_ticks`
    #[must_use]
    pub fn new(ticks_completed: usize, total_ticks: usize) -> Self {
        let percent = if total_ticks == 0 {
            100
        } else {
            let ratio = ticks_completed.min(total_ticks) as f64 / total_ticks as f64;
            (ratio * 100.0).round() as u8
        };
        Self {
            percent,
            ticks_completed,
            total_ticks,
        }
    }

    /// Whether every tick has been processed
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.ticks_completed >= self.total_ticks
    }
}

/// Pipeline-side emitter; stops sending once the receiver is dropped
#[derive(Debug)]
pub struct ProgressReporter {
    sender: Option<ProgressSender>,
}

impl ProgressReporter {
    pub const fn new(sender: Option<ProgressSender>) -> Self {
        Self { sender }
    }

    pub fn report(&mut self, ticks_completed: usize, total_ticks: usize) {
        let Some(sender) = &self.sender else {
            return;
        };
        let progress = AnalysisProgress::new(ticks_completed, total_ticks);
        if sender.send(progress).is_err() {
            trace!("Progress receiver closed, no further updates");
            self.sender = None;
        }
    }
}
