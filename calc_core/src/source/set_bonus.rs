//! SetBonusSource - Bonuses granted by enhancement sets

use crate::effect::Effect;
use crate::source::EffectSource;

/// One granted set bonus
#[derive(Debug, Clone)]
pub struct SetBonusSource {
    pub set_id: String,
    pub bonus_id: String,
    source_id: String,
    effects: Vec<Effect>,
}

impl SetBonusSource {
    pub fn new(set_id: impl Into<String>, bonus_id: impl Into<String>, effects: Vec<Effect>) -> Self {
        let set_id = set_id.into();
        let bonus_id = bonus_id.into();
        SetBonusSource {
            source_id: format!("set:{}:{}", set_id, bonus_id),
            set_id,
            bonus_id,
            effects,
        }
    }
}

impl EffectSource for SetBonusSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    fn priority(&self) -> i32 {
        100
    }

    fn collect(&self, effects: &mut Vec<Effect>) {
        effects.extend(self.effects.iter().cloned());
    }
}
