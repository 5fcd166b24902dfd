// ABOUTME: Catalog of analyzable movements grouped by training category
// ABOUTME: Maps movement spec identifiers to classifier rulesets and filming guides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Classifier ruleset selected by a movement identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Back squat viewed from the side
    #[serde(rename = "squat_mvp")]
    SquatMvp,
}

impl MovementKind {
    /// Identifier stored with uploads and analysis records
    #[must_use]
    pub const fn spec_id(self) -> &'static str {
        match self {
            Self::SquatMvp => "squat_mvp",
        }
    }

    /// Display name of the movement
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::SquatMvp => "Squat",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec_id())
    }
}

impl FromStr for MovementKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "squat_mvp" => Ok(Self::SquatMvp),
            other => Err(AnalysisError::unsupported_movement(other)),
        }
    }
}

/// A movement the athlete can film and submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    /// Display name
    pub name: &'static str,
    /// Filming instructions, sentences separated by `". "`
    pub guide: &'static str,
    /// Ruleset used to classify the movement
    #[serde(rename = "specId")]
    pub kind: MovementKind,
}

impl Movement {
    /// Filming guide split into individual tips
    pub fn guide_tips(&self) -> impl Iterator<Item = &'static str> {
        self.guide
            .split(". ")
            .map(|tip| tip.trim_end_matches('.'))
            .filter(|tip| !tip.is_empty())
    }
}

/// Group of movements shown together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovementCategory {
    /// Category name
    pub category: &'static str,
    /// Icon identifier for clients
    pub icon: &'static str,
    /// Movements available in the category (may be empty)
    pub movements: &'static [Movement],
}

impl MovementCategory {
    /// Whether the category has anything to analyze yet
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.movements.is_empty()
    }
}

const SQUAT: Movement = Movement {
    name: "Squat",
    guide: "Film from the side, parallel to you. Make sure your whole body is visible. \
            Keep the phone steady, ideally on a tripod.",
    kind: MovementKind::SquatMvp,
};

static CATALOG: [MovementCategory; 5] = [
    MovementCategory {
        category: "Strength",
        icon: "Dumbbell",
        movements: &[SQUAT],
    },
    MovementCategory {
        category: "Sprint",
        icon: "Wind",
        movements: &[],
    },
    MovementCategory {
        category: "Throwing",
        icon: "Disc",
        movements: &[],
    },
    MovementCategory {
        category: "Jumping",
        icon: "ChevronsUp",
        movements: &[],
    },
    MovementCategory {
        category: "Weightlifting",
        icon: "Dumbbell",
        movements: &[],
    },
];

/// Every movement category, in display order
#[must_use]
pub fn movement_catalog() -> &'static [MovementCategory] {
    &CATALOG
}

/// Look up a movement by its spec identifier
#[must_use]
pub fn find_movement(spec_id: &str) -> Option<&'static Movement> {
    CATALOG
        .iter()
        .flat_map(|category| category.movements.iter())
        .find(|movement| movement.kind.spec_id() == spec_id.trim())
}
