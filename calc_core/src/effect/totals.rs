//! EffectTotals - grouped magnitudes with a defined zero default

use super::{group, Effect, FxId, GroupedEffect};
use crate::types::{DamageType, EffectType, MezType, PvMode, ToWho};
use std::collections::BTreeMap;

/// Merged magnitudes for one combat mode
///
/// Every lookup answers `0.0` for a key nobody contributed to, so
/// calculators never carry their own "missing means zero" logic.
#[derive(Debug, Clone, Default)]
pub struct EffectTotals {
    mode: PvMode,
    groups: BTreeMap<FxId, GroupedEffect>,
}

impl EffectTotals {
    /// Group `effects` and keep only those active in `mode`
    pub fn from_effects(effects: &[Effect], mode: PvMode) -> Self {
        let active: Vec<Effect> = effects
            .iter()
            .filter(|e| e.pv_mode().active_in(mode))
            .cloned()
            .collect();
        EffectTotals {
            mode,
            groups: group(&active),
        }
    }

    pub fn mode(&self) -> PvMode {
        self.mode
    }

    /// Exact key lookup
    pub fn get(&self, id: &FxId) -> f64 {
        self.groups.get(id).map(|g| g.magnitude).unwrap_or(0.0)
    }

    /// Self-targeted total for an effect type with no sub-type
    pub fn self_total(&self, effect_type: EffectType) -> f64 {
        self.sum(effect_type, None, None, ToWho::SelfTarget)
    }

    /// Self-targeted total for a damage-typed effect
    pub fn self_typed(&self, effect_type: EffectType, damage_type: DamageType) -> f64 {
        self.sum(effect_type, Some(damage_type), None, ToWho::SelfTarget)
    }

    /// Self-targeted total for a mez-typed effect
    pub fn self_mez(&self, effect_type: EffectType, mez_type: MezType) -> f64 {
        self.sum(effect_type, None, Some(mez_type), ToWho::SelfTarget)
    }

    /// Self-targeted total across every sub-type of an effect type
    pub fn self_any(&self, effect_type: EffectType) -> f64 {
        self.groups
            .values()
            .filter(|g| g.id.effect_type == effect_type && g.id.to_who == ToWho::SelfTarget)
            .map(|g| g.magnitude)
            .sum()
    }

    fn sum(
        &self,
        effect_type: EffectType,
        damage_type: Option<DamageType>,
        mez_type: Option<MezType>,
        to_who: ToWho,
    ) -> f64 {
        self.groups
            .values()
            .filter(|g| {
                g.id.effect_type == effect_type
                    && g.id.damage_type == damage_type
                    && g.id.mez_type == mez_type
                    && g.id.to_who == to_who
            })
            .map(|g| g.magnitude)
            .sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &GroupedEffect> {
        self.groups.values()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_zero() {
        let totals = EffectTotals::default();
        assert!((totals.self_total(EffectType::Recharge) - 0.0).abs() < f64::EPSILON);
        assert!((totals.self_typed(EffectType::Defense, DamageType::Fire)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_filtering_and_any_merge() {
        let effects = vec![
            Effect::builder(EffectType::Recharge, 0.10).build().unwrap(),
            Effect::builder(EffectType::Recharge, 0.05)
                .pv_mode(PvMode::Pve)
                .build()
                .unwrap(),
            Effect::builder(EffectType::Recharge, 0.40)
                .pv_mode(PvMode::Pvp)
                .build()
                .unwrap(),
        ];
        let totals = EffectTotals::from_effects(&effects, PvMode::Pve);
        assert!((totals.self_total(EffectType::Recharge) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_target_effects_not_in_self_totals() {
        let effects = vec![Effect::builder(EffectType::Defense, -0.10)
            .damage_type(DamageType::Melee)
            .targeting()
            .build()
            .unwrap()];
        let totals = EffectTotals::from_effects(&effects, PvMode::Pve);
        assert!(totals.self_typed(EffectType::Defense, DamageType::Melee).abs() < f64::EPSILON);
        assert!(!totals.is_empty());
    }

    #[test]
    fn test_self_any_spans_subtypes() {
        let effects = vec![
            Effect::builder(EffectType::MezProtection, 2.0)
                .mez_type(MezType::Held)
                .build()
                .unwrap(),
            Effect::builder(EffectType::MezProtection, 3.0)
                .mez_type(MezType::Stunned)
                .build()
                .unwrap(),
        ];
        let totals = EffectTotals::from_effects(&effects, PvMode::Pve);
        assert!((totals.self_any(EffectType::MezProtection) - 5.0).abs() < f64::EPSILON);
        assert!((totals.self_mez(EffectType::MezProtection, MezType::Held) - 2.0).abs() < f64::EPSILON);
    }
}
