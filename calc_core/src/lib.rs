//! calc_core - Stat calculation engine for character builds
//!
//! This library provides:
//! - Effect: the atomic unit of game behavior, and its grouping by FxId
//! - Enhancement Diversification: diminishing returns on slotted enhancement
//! - ArchetypeCaps / ModifierTables: per-archetype scaling and ceilings
//! - Per-domain calculators: accuracy, damage, defense, control, recharge,
//!   endurance, healing, buffs and pet inheritance
//! - BuildCalculator: composes everything into per-power stats and build totals

pub mod accuracy;
pub mod archetype;
pub mod buffs;
pub mod build;
pub mod config;
pub mod control;
pub mod damage;
pub mod data;
pub mod defense;
pub mod effect;
pub mod endurance;
pub mod enhancement;
pub mod error;
pub mod healing;
pub mod pets;
pub mod prelude;
pub mod purple_patch;
pub mod recharge;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use accuracy::{calculate_accuracy, AccuracyInput, AccuracyResult};
pub use archetype::{ArchetypeCaps, ArchetypeRecord, ArchetypeTable, CappedValue, ModifierTable, ModifierTables};
pub use build::{BuildCalculator, BuildRequest, BuildResult, BuildTotals, BuildWarning, PowerStats, SlottedPower};
pub use config::{default_archetypes, CalcSettings, ConfigError, GameConstants};
pub use control::{KnockbackOutcome, MezEffect, MezOutcome};
pub use damage::{calculate_damage, DamageSummary};
pub use data::{EffectRecord, EnhancementRecord, GameData, PowerRecord, SetBonusRecord};
pub use defense::{calculate_ehp, DefenseValues, ResistanceValues};
pub use effect::{group, Effect, EffectBuilder, EffectTotals, FxId, GroupedEffect};
pub use endurance::{calculate_endurance, EnduranceResult};
pub use enhancement::{apply_ed, get_schedule, EnhancementTotals, Schedule};
pub use error::CalcError;
pub use healing::{calculate_absorb, instant_heal, AbsorbResult, HealingResult};
pub use recharge::{calculate_recharge, RechargeResult};
pub use source::EffectSource;
pub use types::{DamageType, EffectType, EnhanceAspect, MezType, PowerType, PvMode, Stacking, ToWho};
