//! Validation warnings raised while calculating a build

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable problem with a build
///
/// Warnings never stop a calculation; the affected value is clamped or the
/// offending piece is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A build attribute went past its archetype cap
    ValueClamped {
        attribute: String,
        uncapped: f64,
        cap: f64,
    },
    /// A unique enhancement was slotted more than once
    DuplicateUnique {
        enhancement_id: String,
        power_id: String,
    },
    /// An enhancement cannot be slotted at the build's level
    OutOfLevelRange {
        enhancement_id: String,
        power_id: String,
        level: u32,
    },
    /// A set bonus exceeded the rule of five
    SetBonusSuppressed {
        bonus_id: String,
        set_id: String,
        power_id: String,
    },
}

impl BuildWarning {
    pub fn clamped(attribute: impl Into<String>, uncapped: f64, cap: f64) -> Self {
        BuildWarning::ValueClamped {
            attribute: attribute.into(),
            uncapped,
            cap,
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::ValueClamped {
                attribute,
                uncapped,
                cap,
            } => write!(
                f,
                "{} exceeds hard cap ({:.4} > {:.4}), value was clamped",
                attribute, uncapped, cap
            ),
            BuildWarning::DuplicateUnique {
                enhancement_id,
                power_id,
            } => write!(
                f,
                "unique enhancement {} slotted again in {}, extra copy ignored",
                enhancement_id, power_id
            ),
            BuildWarning::OutOfLevelRange {
                enhancement_id,
                power_id,
                level,
            } => write!(
                f,
                "enhancement {} in {} cannot be slotted at level {}, ignored",
                enhancement_id, power_id, level
            ),
            BuildWarning::SetBonusSuppressed {
                bonus_id,
                set_id,
                power_id,
            } => write!(
                f,
                "set bonus {} from {} in {} exceeds the rule of five, suppressed",
                bonus_id, set_id, power_id
            ),
        }
    }
}
