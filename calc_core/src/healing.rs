//! Healing, regeneration and absorption
//!
//! Capping order: max HP is clamped by the archetype first, then absorb
//! shields are clamped by the capped max HP.

use crate::archetype::{ArchetypeRecord, CappedValue};
use crate::config::RecoveryConstants;
use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// Outcome of one instant heal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealingResult {
    /// Hit points the heal is worth
    pub amount: f64,
    pub previous_hp: f64,
    pub new_hp: f64,
    /// Part of `amount` that did not fit under max HP
    pub overheal: f64,
}

impl HealingResult {
    pub fn summary(&self) -> String {
        format!(
            "Healed {:.1} ({:.1} -> {:.1}, {:.1} overheal)",
            self.amount, self.previous_hp, self.new_hp, self.overheal
        )
    }
}

/// Heal of `magnitude_pct` (fraction of max HP) on a target at `current_hp`
pub fn instant_heal(magnitude_pct: f64, current_hp: f64, max_hp: f64) -> HealingResult {
    let amount = magnitude_pct * max_hp;
    let raw = current_hp + amount;
    HealingResult {
        amount,
        previous_hp: current_hp,
        new_hp: raw.min(max_hp),
        overheal: (raw - max_hp).max(0.0),
    }
}

/// A heal spread evenly over ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealOverTime {
    pub total: f64,
    pub ticks: u32,
    pub per_tick: f64,
    pub tick_interval: f64,
}

/// Split `total` across `duration / tick_interval` ticks
///
/// Partial ticks are dropped; a duration shorter than one interval heals
/// everything in a single tick.
pub fn heal_over_time(total: f64, duration: f64, tick_interval: f64) -> Result<HealOverTime, CalcError> {
    if !(tick_interval > 0.0) {
        return Err(CalcError::InvalidTickInterval(tick_interval));
    }
    if duration < 0.0 || duration.is_nan() {
        return Err(CalcError::NegativeDuration(duration));
    }

    let ticks = ((duration / tick_interval).floor() as u32).max(1);
    Ok(HealOverTime {
        total,
        ticks,
        per_tick: total / ticks as f64,
        tick_interval,
    })
}

/// How an absorb source sizes its shield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AbsorbAmount {
    Flat(f64),
    /// Fraction of max HP
    PercentOfMaxHp(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorbSource {
    pub source_id: String,
    pub amount: AbsorbAmount,
}

impl AbsorbSource {
    pub fn new(source_id: impl Into<String>, amount: AbsorbAmount) -> Self {
        AbsorbSource {
            source_id: source_id.into(),
            amount,
        }
    }

    pub fn shield(&self, max_hp: f64) -> f64 {
        match self.amount {
            AbsorbAmount::Flat(value) => value,
            AbsorbAmount::PercentOfMaxHp(fraction) => fraction * max_hp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorbResult {
    /// Source providing the shield, `None` without sources
    pub source_id: Option<String>,
    pub shield: CappedValue,
}

/// Absorb shield from several sources: the single strongest wins
pub fn calculate_absorb(sources: &[AbsorbSource], capped_max_hp: f64) -> AbsorbResult {
    let best = sources
        .iter()
        .map(|s| (s, s.shield(capped_max_hp)))
        .fold(None, |best: Option<(&AbsorbSource, f64)>, (source, shield)| match best {
            Some((_, current)) if current >= shield => best,
            _ => Some((source, shield)),
        });

    match best {
        Some((source, shield)) => AbsorbResult {
            source_id: Some(source.source_id.clone()),
            shield: CappedValue::clamp(shield, capped_max_hp),
        },
        None => AbsorbResult {
            source_id: None,
            shield: CappedValue::default(),
        },
    }
}

/// Regeneration multiplier and its per-second figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegenerationResult {
    pub regen_mult: CappedValue,
    pub per_second: f64,
}

/// `min(1 + bonus, cap) × base_regen × 1.666667`
pub fn calculate_regeneration(
    archetype: &ArchetypeRecord,
    regen_bonus: f64,
    constants: &RecoveryConstants,
) -> RegenerationResult {
    let regen_mult = archetype.caps.apply_regeneration_cap(1.0 + regen_bonus);
    RegenerationResult {
        regen_mult,
        per_second: regen_mult.capped * archetype.base_regen * constants.numeric_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeCaps;

    #[test]
    fn test_instant_heal_within_max() {
        let result = instant_heal(0.25, 1000.0, 2000.0);
        assert!((result.amount - 500.0).abs() < f64::EPSILON);
        assert!((result.new_hp - 1500.0).abs() < f64::EPSILON);
        assert!(result.overheal.abs() < f64::EPSILON);
    }

    #[test]
    fn test_instant_heal_overheal() {
        let result = instant_heal(0.25, 1800.0, 2000.0);
        assert!((result.new_hp - 2000.0).abs() < f64::EPSILON);
        assert!((result.overheal - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heal_over_time() {
        let hot = heal_over_time(300.0, 15.0, 1.5).unwrap();
        assert_eq!(hot.ticks, 10);
        assert!((hot.per_tick - 30.0).abs() < 1e-12);

        let short = heal_over_time(300.0, 0.5, 1.5).unwrap();
        assert_eq!(short.ticks, 1);
        assert!((short.per_tick - 300.0).abs() < f64::EPSILON);

        assert_eq!(
            heal_over_time(300.0, 15.0, 0.0),
            Err(CalcError::InvalidTickInterval(0.0))
        );
    }

    #[test]
    fn test_absorb_takes_highest_not_sum() {
        let sources = vec![
            AbsorbSource::new("barrier", AbsorbAmount::Flat(300.0)),
            AbsorbSource::new("shield", AbsorbAmount::PercentOfMaxHp(0.2)),
            AbsorbSource::new("proc", AbsorbAmount::Flat(100.0)),
        ];
        let result = calculate_absorb(&sources, 2000.0);
        assert_eq!(result.source_id.as_deref(), Some("shield"));
        assert!((result.shield.capped - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_absorb_capped_at_max_hp() {
        let sources = vec![AbsorbSource::new("huge", AbsorbAmount::Flat(5000.0))];
        let result = calculate_absorb(&sources, 2000.0);
        assert!((result.shield.capped - 2000.0).abs() < f64::EPSILON);
        assert!(result.shield.was_clamped());
    }

    #[test]
    fn test_absorb_without_sources() {
        let result = calculate_absorb(&[], 2000.0);
        assert!(result.source_id.is_none());
        assert!(result.shield.capped.abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_regeneration() {
        let archetype = ArchetypeRecord {
            id: "tanker".to_string(),
            name: "Tanker".to_string(),
            column: 0,
            hit_points: 1606.0,
            hit_points_table: None,
            base_regen: 1.0,
            base_recovery: 1.67,
            base_threat: 4.0,
            mez_scale: 1.0,
            caps: ArchetypeCaps::default(),
        };
        let result = calculate_regeneration(&archetype, 0.0, &RecoveryConstants::default());
        assert!((result.per_second - 1.667).abs() < 0.001);
    }
}
