//! Endurance costs and recovery
//!
//! ```text
//! click cost  = base × (1 − discount)                  per activation
//! toggle cost = (base / activate_period) × (1 − discount) per second
//! recovery    = min(1 + Σ bonus, cap) × base_recovery × 1.666667 × (max_end_bonus / 100 + 1)
//! ```

use crate::archetype::{ArchetypeRecord, CappedValue};
use crate::config::RecoveryConstants;
use crate::types::PowerType;
use serde::{Deserialize, Serialize};

/// Endurance cost of a power
///
/// Clicks and summons answer per activation, toggles per second. Autos
/// cost nothing. A discount of 100% or more makes a power free.
pub fn endurance_cost(power_type: PowerType, base_cost: f64, activate_period: f64, discount: f64) -> f64 {
    let factor = (1.0 - discount).max(0.0);
    match power_type {
        PowerType::Click | PowerType::Summon => base_cost * factor,
        PowerType::Toggle if activate_period > 0.0 => base_cost / activate_period * factor,
        PowerType::Toggle | PowerType::Auto => 0.0,
    }
}

/// Build-wide endurance balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnduranceResult {
    pub max_endurance: f64,
    pub recovery_mult: CappedValue,
    /// Endurance recovered per second
    pub recovery_per_second: f64,
    /// Endurance spent per second on running toggles
    pub toggle_drain: f64,
    pub net_per_second: f64,
    /// Seconds from empty to full when the balance is positive
    pub time_to_full: Option<f64>,
    /// Seconds from full to empty when the balance is negative
    pub time_to_zero: Option<f64>,
}

impl EnduranceResult {
    pub fn summary(&self) -> String {
        match (self.time_to_full, self.time_to_zero) {
            (Some(seconds), _) => format!(
                "{:.2}/s recovery, {:.2}/s net, full in {:.1}s",
                self.recovery_per_second, self.net_per_second, seconds
            ),
            (_, Some(seconds)) => format!(
                "{:.2}/s recovery, {:.2}/s net, empty in {:.1}s",
                self.recovery_per_second, self.net_per_second, seconds
            ),
            _ => format!(
                "{:.2}/s recovery, balanced",
                self.recovery_per_second
            ),
        }
    }
}

/// Recovery and net endurance for an archetype
///
/// # Arguments
/// * `archetype` - Supplies base recovery and the recovery cap
/// * `recovery_bonus` - Summed recovery buffs
/// * `max_end_bonus` - Endurance points over the base pool
/// * `toggle_drain` - Endurance per second spent by running toggles
/// * `constants` - Base pool size and the per-second scale
///
/// # Returns
/// Recovery and net endurance per second, with the time to fill or empty
/// the pool
pub fn calculate_endurance(
    archetype: &ArchetypeRecord,
    recovery_bonus: f64,
    max_end_bonus: f64,
    toggle_drain: f64,
    constants: &RecoveryConstants,
) -> EnduranceResult {
    let max_endurance = constants.base_max_endurance + max_end_bonus;
    let recovery_mult = archetype.caps.apply_recovery_cap(1.0 + recovery_bonus);
    let recovery_per_second = recovery_mult.capped
        * archetype.base_recovery
        * constants.numeric_scale
        * (max_end_bonus / 100.0 + 1.0);

    let net_per_second = recovery_per_second - toggle_drain;
    let (time_to_full, time_to_zero) = if net_per_second > 0.0 {
        (Some(max_endurance / net_per_second), None)
    } else if net_per_second < 0.0 {
        (None, Some(max_endurance / net_per_second.abs()))
    } else {
        (None, None)
    };

    EnduranceResult {
        max_endurance,
        recovery_mult,
        recovery_per_second,
        toggle_drain,
        net_per_second,
        time_to_full,
        time_to_zero,
    }
}
