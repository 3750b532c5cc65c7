//! Caller-supplied calculation policy

use crate::types::PvMode;
use serde::{Deserialize, Serialize};

/// How chance-based damage counts toward totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcMode {
    /// Magnitude x probability
    #[default]
    Average,
    /// Full magnitude only when the effect (nearly) always fires
    Minimum,
}

/// Post-processing of a damage total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageReturn {
    #[default]
    Total,
    /// Damage per second over recharge + cast + interrupt
    Dps,
    /// Damage per activation second
    Dpa,
}

/// Policy for one build calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    pub proc_mode: ProcMode,
    pub damage_return: DamageReturn,
    pub pv_mode: PvMode,
    /// Target level minus caster level
    pub enemy_level_offset: i32,
    /// Enemy base tohit used for effective hit points
    pub enemy_tohit: f64,
    /// Enemy defense used for hit chance
    pub enemy_defense: f64,
    /// Mez protection of the target used for control outcomes
    pub target_mez_protection: f64,
    /// Knockback protection of the target
    pub target_knockback_protection: f64,
    /// Mez resistance of the target, in [0, 1]
    pub target_mez_resistance: f64,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            proc_mode: ProcMode::Average,
            damage_return: DamageReturn::Total,
            pv_mode: PvMode::Pve,
            enemy_level_offset: 0,
            enemy_tohit: 0.5,
            enemy_defense: 0.0,
            target_mez_protection: 0.0,
            target_knockback_protection: 0.0,
            target_mez_resistance: 0.0,
        }
    }
}
