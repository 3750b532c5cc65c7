//! Prelude module for convenient imports
//!
//! ```rust
//! use calc_core::prelude::*;
//! ```

// Core types
pub use crate::effect::{Effect, EffectTotals};
pub use crate::error::CalcError;
pub use crate::types::{Aspect, DamageType, EffectType, EnhanceAspect, MezType, PowerType, PvMode, Stacking, ToWho};

// Data and configuration
pub use crate::config::{default_archetypes, CalcSettings, DamageReturn, GameConstants, ProcMode};
pub use crate::data::{EffectRecord, EnhancementRecord, GameData, PowerRecord};

// Enhancement and caps
pub use crate::archetype::{ArchetypeCaps, CappedValue};
pub use crate::enhancement::{apply_ed, Schedule};

// Calculators
pub use crate::accuracy::{calculate_accuracy, AccuracyInput};
pub use crate::damage::{calculate_damage, DamageSummary};
pub use crate::defense::{calculate_ehp, DefenseValues};
pub use crate::recharge::calculate_recharge;

// Build
pub use crate::build::{BuildCalculator, BuildRequest, BuildResult, SlottedPower};
