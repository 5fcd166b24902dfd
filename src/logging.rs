// ABOUTME: Logging configuration and structured logging setup for the analyzer and CLI
// ABOUTME: Configures log levels, formatters, and output destinations through tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use std::env;
use std::io;

use anyhow::Result;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, unknown values fall back to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::MOVEMENT_ANALYSIS.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::MOVEMENT_ANALYSIS.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Same configuration with `level` replaced, used by `--verbose` flags
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Filter built from `RUST_LOG` or the configured level
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |directive| EnvFilter::new(&directive),
        );
        // Rayon worker noise stays out of analysis logs
        base.add_directive("rayon=warn".parse().unwrap_or_else(|_| Level::WARN.into()))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            "Logging initialized: {config_summary}"
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
