//! Typed and positional defense, typed resistance

use crate::archetype::{ArchetypeCaps, CappedValue};
use crate::effect::{Effect, EffectTotals};
use crate::types::{DamageType, EffectType, PvMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Defense per damage type and per position
///
/// Typed (smashing, fire, ...) and positional (melee, ranged, AoE) values
/// live side by side and are never summed; an attack is defended by the
/// better of its two categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseValues {
    values: BTreeMap<DamageType, f64>,
}

impl DefenseValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Self-targeted defense totals, typed and positional
    pub fn from_totals(totals: &EffectTotals) -> Self {
        let mut values = Self::new();
        for damage_type in DamageType::typed().iter().chain(DamageType::positional()) {
            let value = totals.self_typed(EffectType::Defense, *damage_type);
            if value != 0.0 {
                values.set(*damage_type, value);
            }
        }
        values
    }

    /// Self-targeted defense with debuffs reduced by `ddr`
    ///
    /// Buffs and debuffs are grouped apart, then combined per category as
    /// `buffs − |debuffs| × (1 − ddr)`.
    pub fn from_effects(effects: &[Effect], mode: PvMode, ddr: f64) -> Self {
        let (buffs, debuffs): (Vec<Effect>, Vec<Effect>) = effects
            .iter()
            .filter(|e| e.effect_type() == EffectType::Defense)
            .cloned()
            .partition(|e| e.value() >= 0.0);
        let buffs = EffectTotals::from_effects(&buffs, mode);
        let debuffs = EffectTotals::from_effects(&debuffs, mode);

        let mut values = Self::new();
        for damage_type in DamageType::typed().iter().chain(DamageType::positional()) {
            let buff = buffs.self_typed(EffectType::Defense, *damage_type);
            let debuff = debuffs.self_typed(EffectType::Defense, *damage_type).abs();
            if buff != 0.0 || debuff != 0.0 {
                values.set(*damage_type, apply_defense_debuff(buff, debuff, ddr));
            }
        }
        values
    }

    pub fn set(&mut self, damage_type: DamageType, value: f64) {
        self.values.insert(damage_type, value);
    }

    pub fn add(&mut self, damage_type: DamageType, value: f64) {
        *self.values.entry(damage_type).or_insert(0.0) += value;
    }

    /// Defense for one category, zero when absent
    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.values.get(&damage_type).copied().unwrap_or(0.0)
    }

    /// Defense against an attack of `typed` damage delivered at `position`
    ///
    /// `max(typed, positional)`, never the sum.
    pub fn effective_against(&self, typed: DamageType, position: DamageType) -> f64 {
        self.get(typed).max(self.get(position))
    }

    /// Apply a defense debuff of `debuff` to every category, reduced by DDR
    pub fn debuffed(&self, debuff: f64, ddr: f64) -> Self {
        DefenseValues {
            values: self
                .values
                .iter()
                .map(|(damage_type, value)| (*damage_type, apply_defense_debuff(*value, debuff, ddr)))
                .collect(),
        }
    }

    /// Every category clamped at the archetype defense cap
    pub fn capped(&self, caps: &ArchetypeCaps) -> BTreeMap<DamageType, CappedValue> {
        self.values
            .iter()
            .map(|(damage_type, value)| (*damage_type, caps.apply_defense_cap(*value)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, f64)> + '_ {
        self.values.iter().map(|(t, v)| (*t, *v))
    }
}

/// Net defense after a debuff of magnitude `debuff`
///
/// `base − debuff × (1 − ddr)`. DDR above 1.0 turns the debuff into a
/// net gain.
pub fn apply_defense_debuff(base: f64, debuff: f64, ddr: f64) -> f64 {
    base - debuff * (1.0 - ddr)
}

/// Resistance per damage type (no positional resistance exists)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResistanceValues {
    values: BTreeMap<DamageType, f64>,
}

impl ResistanceValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_totals(totals: &EffectTotals) -> Self {
        let mut values = Self::new();
        for damage_type in DamageType::typed() {
            let value = totals.self_typed(EffectType::Resistance, *damage_type);
            if value != 0.0 {
                values.set(*damage_type, value);
            }
        }
        values
    }

    /// Positional categories are ignored
    pub fn set(&mut self, damage_type: DamageType, value: f64) {
        if damage_type.is_positional() {
            tracing::trace!(?damage_type, "positional resistance ignored");
            return;
        }
        self.values.insert(damage_type, value);
    }

    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.values.get(&damage_type).copied().unwrap_or(0.0)
    }

    /// Every type clamped at the archetype resistance cap
    pub fn capped(&self, caps: &ArchetypeCaps) -> BTreeMap<DamageType, CappedValue> {
        self.values
            .iter()
            .map(|(damage_type, value)| (*damage_type, caps.apply_resistance_cap(*value)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, f64)> + '_ {
        self.values.iter().map(|(t, v)| (*t, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::types::PvMode;

    #[test]
    fn test_effective_is_max_not_sum() {
        let mut defense = DefenseValues::new();
        defense.set(DamageType::Fire, 0.20);
        defense.set(DamageType::Ranged, 0.35);

        assert!((defense.effective_against(DamageType::Fire, DamageType::Ranged) - 0.35).abs() < f64::EPSILON);
        assert!((defense.effective_against(DamageType::Fire, DamageType::Melee) - 0.20).abs() < f64::EPSILON);
        assert!(defense.effective_against(DamageType::Cold, DamageType::Aoe).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ddr_reduces_debuff() {
        assert!((apply_defense_debuff(0.45, 0.20, 0.0) - 0.25).abs() < 1e-12);
        assert!((apply_defense_debuff(0.45, 0.20, 0.5) - 0.35).abs() < 1e-12);
        assert!((apply_defense_debuff(0.45, 0.20, 1.0) - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_ddr_above_one_is_net_buff() {
        let net = apply_defense_debuff(0.45, 0.20, 1.5);
        assert!((net - 0.55).abs() < 1e-12);
        assert!(net > 0.45);
    }

    #[test]
    fn test_debuffed_applies_to_every_category() {
        let mut defense = DefenseValues::new();
        defense.set(DamageType::Smashing, 0.30);
        defense.set(DamageType::Melee, 0.40);
        let debuffed = defense.debuffed(0.10, 0.5);
        assert!((debuffed.get(DamageType::Smashing) - 0.25).abs() < 1e-12);
        assert!((debuffed.get(DamageType::Melee) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_from_totals() {
        let effects = vec![
            Effect::builder(EffectType::Defense, 0.05)
                .damage_type(DamageType::Melee)
                .build()
                .unwrap(),
            Effect::builder(EffectType::Defense, 0.0375)
                .damage_type(DamageType::Melee)
                .build()
                .unwrap(),
            Effect::builder(EffectType::Resistance, 0.3)
                .damage_type(DamageType::Fire)
                .build()
                .unwrap(),
        ];
        let totals = EffectTotals::from_effects(&effects, PvMode::Pve);
        let defense = DefenseValues::from_totals(&totals);
        assert!((defense.get(DamageType::Melee) - 0.0875).abs() < 1e-12);

        let resistance = ResistanceValues::from_totals(&totals);
        assert!((resistance.get(DamageType::Fire) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_from_effects_resists_debuffs() {
        let melee = |magnitude: f64| {
            Effect::builder(EffectType::Defense, magnitude)
                .damage_type(DamageType::Melee)
                .build()
                .unwrap()
        };
        let effects = vec![melee(0.30), melee(-0.20)];

        let resisted = DefenseValues::from_effects(&effects, PvMode::Pve, 0.5);
        assert!((resisted.get(DamageType::Melee) - 0.20).abs() < 1e-12);

        let unresisted = DefenseValues::from_effects(&effects, PvMode::Pve, 0.0);
        assert!((unresisted.get(DamageType::Melee) - 0.10).abs() < 1e-12);
        assert!(unresisted.get(DamageType::Ranged).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resistance_hard_capped() {
        let mut resistance = ResistanceValues::new();
        resistance.set(DamageType::Smashing, 0.95);
        resistance.set(DamageType::Fire, 0.40);
        resistance.set(DamageType::Melee, 0.50);

        let caps = ArchetypeCaps {
            resistance_cap: 0.9,
            ..Default::default()
        };
        let capped = resistance.capped(&caps);
        assert!((capped[&DamageType::Smashing].capped - 0.9).abs() < f64::EPSILON);
        assert!(capped[&DamageType::Smashing].was_clamped());
        assert!(!capped[&DamageType::Fire].was_clamped());
        assert!(!capped.contains_key(&DamageType::Melee));
    }
}
