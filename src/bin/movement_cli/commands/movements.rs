// ABOUTME: movements subcommand listing the catalog and filming guides
// ABOUTME: Prints plain text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::process::ExitCode;

use anyhow::Result;
use movement_analysis::catalog::movement_catalog;
use movement_analysis::report::render_catalog;

/// Print every movement category
pub fn list(json: bool) -> Result<ExitCode> {
    let catalog = movement_catalog();
    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
    } else {
        print!("{}", render_catalog(catalog));
    }
    Ok(ExitCode::SUCCESS)
}
