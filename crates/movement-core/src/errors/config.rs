// ABOUTME: Configuration error types for pipeline and classifier settings
// ABOUTME: Defines error variants for invalid ranges, parse failures, and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., visibility threshold not within 0-1)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable could not be parsed into the expected type
    #[error("Failed to parse environment variable {variable}: {value:?}")]
    Parse {
        /// Name of the environment variable
        variable: &'static str,
        /// Raw value found in the environment
        value: String,
    },

    /// Cross-field validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}
