//! Grouping effects by FxId and merging them by their stacking policy

use super::Effect;
use crate::types::{DamageType, EffectType, MezType, PvMode, Stacking, ToWho};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregation key: effects sharing an FxId merge into one magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FxId {
    pub effect_type: EffectType,
    pub damage_type: Option<DamageType>,
    pub mez_type: Option<MezType>,
    pub to_who: ToWho,
    pub pv_mode: PvMode,
}

impl FxId {
    pub fn of(effect: &Effect) -> Self {
        FxId {
            effect_type: effect.effect_type(),
            damage_type: effect.damage_type(),
            mez_type: effect.mez_type(),
            to_who: effect.to_who(),
            pv_mode: effect.pv_mode(),
        }
    }
}

/// Merged result for one FxId
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedEffect {
    pub id: FxId,
    pub magnitude: f64,
    /// Every effect that was offered to this group, in input order
    pub sources: Vec<Effect>,
}

impl GroupedEffect {
    fn seed(effect: &Effect) -> Self {
        GroupedEffect {
            id: FxId::of(effect),
            magnitude: effect.value(),
            sources: vec![effect.clone()],
        }
    }

    fn merge(&mut self, effect: &Effect) {
        match effect.stacking() {
            Stacking::Yes => self.magnitude += effect.value(),
            Stacking::No => {}
            Stacking::Replace => self.magnitude = effect.value(),
        }
        self.sources.push(effect.clone());
    }
}

/// Group effects by FxId
///
/// Input order is significant for `No` (first wins) and `Replace`
/// (last wins). Nothing is filtered here, zero-probability effects included;
/// each calculator decides what it counts.
pub fn group(effects: &[Effect]) -> BTreeMap<FxId, GroupedEffect> {
    let mut groups: BTreeMap<FxId, GroupedEffect> = BTreeMap::new();

    for effect in effects {
        let id = FxId::of(effect);
        match groups.get_mut(&id) {
            Some(existing) => existing.merge(effect),
            None => {
                groups.insert(id, GroupedEffect::seed(effect));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defense(mag: f64, stacking: Stacking) -> Effect {
        Effect::builder(EffectType::Defense, mag)
            .damage_type(DamageType::Melee)
            .stacking(stacking)
            .build()
            .unwrap()
    }

    #[test]
    fn test_yes_sums() {
        let groups = group(&[defense(0.05, Stacking::Yes), defense(0.10, Stacking::Yes)]);
        assert_eq!(groups.len(), 1);
        let grouped = groups.values().next().unwrap();
        assert!((grouped.magnitude - 0.15).abs() < 1e-12);
        assert_eq!(grouped.sources.len(), 2);
    }

    #[test]
    fn test_no_keeps_first() {
        let groups = group(&[defense(0.05, Stacking::No), defense(0.10, Stacking::No)]);
        let grouped = groups.values().next().unwrap();
        assert!((grouped.magnitude - 0.05).abs() < f64::EPSILON);
        assert_eq!(grouped.sources.len(), 2);
    }

    #[test]
    fn test_replace_keeps_last() {
        let groups = group(&[
            defense(0.05, Stacking::Replace),
            defense(0.10, Stacking::Replace),
            defense(0.02, Stacking::Replace),
        ]);
        let grouped = groups.values().next().unwrap();
        assert!((grouped.magnitude - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distinct_keys_stay_apart() {
        let ranged = Effect::builder(EffectType::Defense, 0.07)
            .damage_type(DamageType::Ranged)
            .build()
            .unwrap();
        let pvp = Effect::builder(EffectType::Defense, 0.07)
            .damage_type(DamageType::Melee)
            .pv_mode(PvMode::Pvp)
            .build()
            .unwrap();
        let groups = group(&[defense(0.05, Stacking::Yes), ranged, pvp]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_zero_probability_not_filtered() {
        let proc_effect = Effect::builder(EffectType::Damage, 71.75)
            .damage_type(DamageType::Fire)
            .probability(0.0)
            .build()
            .unwrap();
        let groups = group(&[proc_effect]);
        assert_eq!(groups.len(), 1);
        assert!((groups.values().next().unwrap().magnitude - 71.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).is_empty());
    }
}
