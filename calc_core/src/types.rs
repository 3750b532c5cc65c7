//! Core enums shared by the effect model, the calculators and the data records

use serde::{Deserialize, Serialize};

/// What a single effect does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Damage,
    DamageBuff,
    Defense,
    DefenseDebuffResistance,
    Resistance,
    Mez,
    MezProtection,
    MezResistance,
    Recharge,
    Endurance,
    EnduranceDiscount,
    Recovery,
    Regeneration,
    Heal,
    HitPoints,
    MaxEndurance,
    Absorb,
    Stealth,
    Perception,
    Range,
    ToHit,
    Accuracy,
    Interrupt,
    RunSpeed,
    JumpSpeed,
    FlySpeed,
    MaxRunSpeed,
    MaxJumpSpeed,
    MaxFlySpeed,
    Threat,
}

impl EffectType {
    /// The enhancement aspect that boosts effects of this type, if any
    pub fn enhanced_by(self) -> Option<EnhanceAspect> {
        match self {
            EffectType::Damage => Some(EnhanceAspect::Damage),
            EffectType::Defense => Some(EnhanceAspect::Defense),
            EffectType::Resistance => Some(EnhanceAspect::Resistance),
            EffectType::ToHit => Some(EnhanceAspect::ToHit),
            EffectType::Heal | EffectType::Regeneration | EffectType::Absorb => {
                Some(EnhanceAspect::Heal)
            }
            EffectType::Recovery | EffectType::Endurance => Some(EnhanceAspect::EnduranceModification),
            EffectType::RunSpeed | EffectType::JumpSpeed | EffectType::FlySpeed => {
                Some(EnhanceAspect::Movement)
            }
            EffectType::Range => Some(EnhanceAspect::Range),
            _ => None,
        }
    }

    /// How several buffs of this type combine
    pub fn buff_stacking(self) -> BuffStacking {
        match self {
            EffectType::Perception | EffectType::Range => BuffStacking::Multiplicative,
            EffectType::Absorb => BuffStacking::Best,
            _ => BuffStacking::Additive,
        }
    }
}

/// Damage types, including the three positional defense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Smashing,
    Lethal,
    Fire,
    Cold,
    Energy,
    Negative,
    Toxic,
    Psionic,
    Special,
    Melee,
    Ranged,
    Aoe,
}

impl DamageType {
    /// Typed damage categories (everything that is not positional)
    pub fn typed() -> &'static [DamageType] {
        &[
            DamageType::Smashing,
            DamageType::Lethal,
            DamageType::Fire,
            DamageType::Cold,
            DamageType::Energy,
            DamageType::Negative,
            DamageType::Toxic,
            DamageType::Psionic,
        ]
    }

    /// Positional defense categories
    pub fn positional() -> &'static [DamageType] {
        &[DamageType::Melee, DamageType::Ranged, DamageType::Aoe]
    }

    pub fn is_positional(self) -> bool {
        matches!(self, DamageType::Melee | DamageType::Ranged | DamageType::Aoe)
    }
}

/// Control effect sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MezType {
    Held,
    Stunned,
    Immobilized,
    Confused,
    Sleep,
    Placate,
    Taunt,
    Terrorized,
    Untouchable,
    Knockback,
    Knockup,
    Repel,
    ToggleDrop,
}

impl MezType {
    pub fn all() -> &'static [MezType] {
        &[
            MezType::Held,
            MezType::Stunned,
            MezType::Immobilized,
            MezType::Confused,
            MezType::Sleep,
            MezType::Placate,
            MezType::Taunt,
            MezType::Terrorized,
            MezType::Untouchable,
            MezType::Knockback,
            MezType::Knockup,
            MezType::Repel,
            MezType::ToggleDrop,
        ]
    }

    /// Whether duration enhancement applies to this mez
    pub fn duration_enhanceable(self) -> bool {
        matches!(
            self,
            MezType::Held
                | MezType::Stunned
                | MezType::Immobilized
                | MezType::Confused
                | MezType::Sleep
                | MezType::Placate
                | MezType::Taunt
                | MezType::Terrorized
                | MezType::Untouchable
        )
    }

    /// Knock-style mezzes resolve by distance rather than duration
    pub fn is_knock(self) -> bool {
        matches!(self, MezType::Knockback | MezType::Knockup)
    }
}

/// Who an effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToWho {
    #[serde(rename = "self")]
    SelfTarget,
    Target,
}

/// Which combat mode an effect is active in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PvMode {
    Pve,
    Pvp,
    #[default]
    Any,
}

impl PvMode {
    /// Whether an effect tagged `self` is active while calculating in `mode`
    pub fn active_in(self, mode: PvMode) -> bool {
        self == PvMode::Any || mode == PvMode::Any || self == mode
    }
}

/// How effects sharing an FxId merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stacking {
    #[default]
    Yes,
    No,
    Replace,
}

/// Which part of an attribute an effect modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    #[default]
    Current,
    Max,
    Strength,
    Absolute,
}

/// Buff/debuff combination policy per attribute category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffStacking {
    Additive,
    /// `Π(1 + mᵢ) − 1`
    Multiplicative,
    /// Single largest-magnitude value
    Best,
}

/// Attribute an enhancement improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "aspect", content = "mez", rename_all = "snake_case")]
pub enum EnhanceAspect {
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
    MezDuration(MezType),
}

/// Activation model of a power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerType {
    #[default]
    Click,
    Toggle,
    Auto,
    Summon,
}
