// ABOUTME: Cooperative cancellation flag shared between a caller and a running analysis
// ABOUTME: Checked by the pipeline between ticks; cancelling never interrupts a tick midway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation handle, all clones share one flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation, idempotent
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
