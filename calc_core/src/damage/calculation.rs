//! Damage calculation - turning a power's effects into a DamageSummary

use super::DamageSummary;
use crate::archetype::{ArchetypeCaps, CappedValue};
use crate::config::{CalcSettings, DamageReturn, ProcMode, TimingConstants};
use crate::effect::Effect;
use crate::types::{DamageType, EffectType};
use serde::{Deserialize, Serialize};

/// Probability at or above which Minimum mode counts a proc as certain
pub const MINIMUM_MODE_THRESHOLD: f64 = 0.999;

/// Activation timings of a power, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerTiming {
    pub recharge_time: f64,
    pub cast_time: f64,
    pub interrupt_time: f64,
    /// Toggle pulse period
    pub activate_period: f64,
}

/// Expected number of ticks of a DoT that stops on the first miss
///
/// `Σ pⁱ for i in 0..n`, i.e. `(1 − pⁿ) / (1 − p)`.
pub fn expected_ticks(probability: f64, ticks: u32) -> f64 {
    if probability >= 1.0 {
        return ticks as f64;
    }
    if probability <= 0.0 || ticks == 0 {
        return 0.0;
    }
    (1.0 - probability.powi(ticks as i32)) / (1.0 - probability)
}

/// Damage multiplier `1 + enhancement + buff`, capped by the archetype
pub fn damage_multiplier(enhancement: f64, buff: f64, caps: &ArchetypeCaps) -> CappedValue {
    caps.apply_damage_cap(1.0 + enhancement + buff)
}

/// Expected amount of a chance-based effect under `mode`
pub fn chance_weighted(amount: f64, probability: f64, mode: ProcMode) -> f64 {
    match mode {
        ProcMode::Average => amount * probability,
        ProcMode::Minimum if probability >= MINIMUM_MODE_THRESHOLD => amount,
        ProcMode::Minimum => 0.0,
    }
}

/// Contribution of one effect to the damage total, `None` when it never counts
fn effect_damage(
    effect: &Effect,
    timing: &PowerTiming,
    settings: &CalcSettings,
    tick_interval: f64,
) -> Option<f64> {
    if effect.effect_type() != EffectType::Damage
        || effect.probability() <= 0.0
        || effect.is_display_only_damage()
    {
        return None;
    }

    let value = effect.value();
    let mut amount = if effect.cancel_on_miss() {
        value * expected_ticks(effect.probability(), effect.ticks())
    } else {
        chance_weighted(value * effect.ticks() as f64, effect.probability(), settings.proc_mode)
    };

    if effect.enhancement_tick() {
        amount *= timing.activate_period / tick_interval;
    }

    Some(amount)
}

/// Calculate the damage of one activation of a power
pub fn calculate_damage(
    effects: &[Effect],
    timing: &PowerTiming,
    settings: &CalcSettings,
    constants: &TimingConstants,
) -> DamageSummary {
    let mut summary = DamageSummary {
        mode: settings.damage_return,
        ..Default::default()
    };

    for effect in effects {
        let Some(amount) = effect_damage(effect, timing, settings, constants.enhancement_tick_interval)
        else {
            continue;
        };
        if effect.is_proc() {
            summary.proc_damage += amount;
        }
        summary.add_damage(effect.damage_type().unwrap_or(DamageType::Special), amount);
    }

    let total = summary.total();
    summary.value = match settings.damage_return {
        DamageReturn::Total => total,
        DamageReturn::Dps => {
            per_second(total, timing.recharge_time + timing.cast_time + timing.interrupt_time)
        }
        DamageReturn::Dpa => per_second(total, timing.cast_time),
    };

    tracing::trace!(total, value = summary.value, mode = ?settings.damage_return, "damage calculated");
    summary
}

fn per_second(total: f64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        total / seconds
    } else {
        0.0
    }
}
