//! Enhancement and set bonus records

use super::EffectRecord;
use crate::types::{EnhanceAspect, MezType};
use serde::{Deserialize, Serialize};

/// One enhanced aspect and its bonus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBonus", into = "RawBonus")]
pub struct EnhancementBonus {
    pub aspect: EnhanceAspect,
    pub magnitude: f64,
}

/// Flat data-file shape: `aspect = "mez_duration"`, `mez = "held"`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawBonus {
    aspect: AspectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mez: Option<MezType>,
    magnitude: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum AspectKind {
    Damage,
    Accuracy,
    Recharge,
    EnduranceDiscount,
    EnduranceModification,
    Defense,
    Resistance,
    ToHit,
    Range,
    Heal,
    Movement,
    Interrupt,
    MezDuration,
}

impl TryFrom<RawBonus> for EnhancementBonus {
    type Error = String;

    fn try_from(raw: RawBonus) -> Result<Self, Self::Error> {
        let aspect = match raw.aspect {
            AspectKind::Damage => EnhanceAspect::Damage,
            AspectKind::Accuracy => EnhanceAspect::Accuracy,
            AspectKind::Recharge => EnhanceAspect::Recharge,
            AspectKind::EnduranceDiscount => EnhanceAspect::EnduranceDiscount,
            AspectKind::EnduranceModification => EnhanceAspect::EnduranceModification,
            AspectKind::Defense => EnhanceAspect::Defense,
            AspectKind::Resistance => EnhanceAspect::Resistance,
            AspectKind::ToHit => EnhanceAspect::ToHit,
            AspectKind::Range => EnhanceAspect::Range,
            AspectKind::Heal => EnhanceAspect::Heal,
            AspectKind::Movement => EnhanceAspect::Movement,
            AspectKind::Interrupt => EnhanceAspect::Interrupt,
            AspectKind::MezDuration => match raw.mez {
                Some(mez) => EnhanceAspect::MezDuration(mez),
                None => return Err("mez_duration bonus needs a `mez` type".to_string()),
            },
        };
        Ok(EnhancementBonus {
            aspect,
            magnitude: raw.magnitude,
        })
    }
}

impl From<EnhancementBonus> for RawBonus {
    fn from(bonus: EnhancementBonus) -> Self {
        let (aspect, mez) = match bonus.aspect {
            EnhanceAspect::Damage => (AspectKind::Damage, None),
            EnhanceAspect::Accuracy => (AspectKind::Accuracy, None),
            EnhanceAspect::Recharge => (AspectKind::Recharge, None),
            EnhanceAspect::EnduranceDiscount => (AspectKind::EnduranceDiscount, None),
            EnhanceAspect::EnduranceModification => (AspectKind::EnduranceModification, None),
            EnhanceAspect::Defense => (AspectKind::Defense, None),
            EnhanceAspect::Resistance => (AspectKind::Resistance, None),
            EnhanceAspect::ToHit => (AspectKind::ToHit, None),
            EnhanceAspect::Range => (AspectKind::Range, None),
            EnhanceAspect::Heal => (AspectKind::Heal, None),
            EnhanceAspect::Movement => (AspectKind::Movement, None),
            EnhanceAspect::Interrupt => (AspectKind::Interrupt, None),
            EnhanceAspect::MezDuration(mez) => (AspectKind::MezDuration, Some(mez)),
        };
        RawBonus {
            aspect,
            mez,
            magnitude: bonus.magnitude,
        }
    }
}

/// One enhancement as delivered by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bonuses: Vec<EnhancementBonus>,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// At most one copy per build
    #[serde(default)]
    pub unique: bool,
    /// Effects granted to the host power (chance-based procs)
    #[serde(default)]
    pub proc_effects: Vec<EffectRecord>,
    /// Enhancement set this piece belongs to
    #[serde(default)]
    pub set_id: Option<String>,
}

fn default_min_level() -> u32 {
    1
}

fn default_max_level() -> u32 {
    55
}

impl EnhancementRecord {
    pub fn is_proc(&self) -> bool {
        !self.proc_effects.is_empty()
    }

    pub fn allows_level(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

/// Bonus granted for slotting enough pieces of a set in one power
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBonusRecord {
    pub set_id: String,
    pub pieces_required: u32,
    /// Identity used for the rule of five (same bonus in different sets
    /// shares the id)
    pub bonus_id: String,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
}
