// ABOUTME: Plain-text rendering of analysis results, failures, and the movement catalog
// ABOUTME: Shared by the CLI and anything else that shows a checklist to an athlete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write;

use crate::catalog::MovementCategory;
use crate::errors::AnalysisError;
use crate::models::AnalysisResult;

const PASS_MARK: &str = "[x]";
const FAIL_MARK: &str = "[ ]";

/// Checklist report for a completed analysis
#[must_use]
pub fn render_result(movement_name: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{movement_name} analysis");
    for criterion in result.criteria() {
        let mark = if criterion.passed { PASS_MARK } else { FAIL_MARK };
        let _ = writeln!(out, "  {mark} {}", criterion.label);
    }
    let _ = writeln!(out, "Frames analyzed: {}", result.frames_analyzed);
    if result.passed_all() {
        let _ = writeln!(out, "All technique criteria met.");
    }
    out
}

/// Message shown when an analysis does not produce a result
#[must_use]
pub fn render_failure(error: &AnalysisError) -> String {
    format!("Analysis not completed: {}", error.user_message())
}

/// Catalog listing with filming guides
#[must_use]
pub fn render_catalog(categories: &[MovementCategory]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{} {}", category.icon, category.category);
        if !category.is_available() {
            let _ = writeln!(out, "  (coming soon)");
            continue;
        }
        for movement in category.movements {
            let _ = writeln!(out, "  {} [{}]", movement.name, movement.kind.spec_id());
            for tip in movement.guide_tips() {
                let _ = writeln!(out, "    - {tip}");
            }
        }
    }
    out
}
