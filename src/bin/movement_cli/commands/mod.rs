// ABOUTME: Command implementations for movement-cli
// ABOUTME: One module per subcommand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod inspect;
pub mod movements;
