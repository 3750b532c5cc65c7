//! GlobalBuffSource - Caller-supplied build-wide buffs

use crate::effect::Effect;
use crate::source::EffectSource;

/// Buffs that exist outside the slotted powers (incarnate abilities,
/// temporary powers, outside support)
#[derive(Debug, Clone)]
pub struct GlobalBuffSource {
    pub buff_id: String,
    effects: Vec<Effect>,
}

impl GlobalBuffSource {
    pub fn new(buff_id: impl Into<String>, effects: Vec<Effect>) -> Self {
        GlobalBuffSource {
            buff_id: buff_id.into(),
            effects,
        }
    }
}

impl EffectSource for GlobalBuffSource {
    fn id(&self) -> &str {
        &self.buff_id
    }

    fn priority(&self) -> i32 {
        200
    }

    fn collect(&self, effects: &mut Vec<Effect>) {
        effects.extend(self.effects.iter().cloned());
    }
}
