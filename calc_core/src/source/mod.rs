//! EffectSource - Trait and implementations for build-wide effect providers

mod global;
mod power;
mod set_bonus;

pub use global::GlobalBuffSource;
pub use power::PowerSource;
pub use set_bonus::SetBonusSource;

use crate::effect::Effect;

/// Anything that contributes effects to the build totals
pub trait EffectSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for collection order (higher = collected later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Slotted powers: 0
    /// - Set bonuses: 100
    /// - Global buffs: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Append this source's effects
    fn collect(&self, effects: &mut Vec<Effect>);
}

/// Collect every source's effects in priority order
///
/// Sources with equal priority keep their input order, so `Replace` and
/// `No` stacking stay deterministic.
pub fn collect_effects(sources: &[&dyn EffectSource]) -> Vec<Effect> {
    let mut ordered: Vec<&dyn EffectSource> = sources.to_vec();
    ordered.sort_by_key(|s| s.priority());

    let mut effects = Vec::new();
    for source in ordered {
        let before = effects.len();
        source.collect(&mut effects);
        tracing::trace!(
            source = source.id(),
            priority = source.priority(),
            effects = effects.len() - before,
            "collected effects"
        );
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EffectType, Stacking};

    #[test]
    fn test_priority_orders_collection() {
        let late = GlobalBuffSource::new(
            "incarnate",
            vec![Effect::builder(EffectType::Recharge, 0.4)
                .stacking(Stacking::Replace)
                .build()
                .unwrap()],
        );
        let early = SetBonusSource::new(
            "luck_of_the_gambler",
            "recharge_7_5",
            vec![Effect::builder(EffectType::Recharge, 0.075).build().unwrap()],
        );

        let effects = collect_effects(&[&late, &early]);
        assert_eq!(effects.len(), 2);
        assert!((effects[0].magnitude() - 0.075).abs() < f64::EPSILON);
        assert!((effects[1].magnitude() - 0.4).abs() < f64::EPSILON);
    }
}
