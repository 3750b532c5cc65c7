//! PowerSource - Self effects of a running power

use crate::effect::Effect;
use crate::source::EffectSource;
use crate::types::{EffectType, ToWho};

/// Self-targeted effects of one slotted, active power
///
/// Effects carry their buffed magnitudes. Damage and heals are per-activation
/// numbers and never reach the build totals.
#[derive(Debug, Clone)]
pub struct PowerSource {
    pub power_id: String,
    effects: Vec<Effect>,
}

impl PowerSource {
    pub fn new(power_id: impl Into<String>, effects: &[Effect]) -> Self {
        PowerSource {
            power_id: power_id.into(),
            effects: effects
                .iter()
                .filter(|e| e.to_who() == ToWho::SelfTarget && contributes_to_build(e.effect_type()))
                .cloned()
                .collect(),
        }
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
}

fn contributes_to_build(effect_type: EffectType) -> bool {
    !matches!(
        effect_type,
        EffectType::Damage | EffectType::Heal | EffectType::Endurance | EffectType::Interrupt
    )
}

impl EffectSource for PowerSource {
    fn id(&self) -> &str {
        &self.power_id
    }

    fn priority(&self) -> i32 {
        0
    }

    fn collect(&self, effects: &mut Vec<Effect>) {
        effects.extend(self.effects.iter().cloned());
    }
}
