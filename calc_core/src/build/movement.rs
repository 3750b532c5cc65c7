//! Movement speed
//!
//! Three tiers: base speed, enhanced speed (total buff floored at −90%),
//! and a soft cap that buffs can raise up to the absolute MaxMax cap.
//!
//! ```text
//! enhanced  = base × (1 + max(buff, min_buff))
//! soft_cap  = min(soft_cap × (1 + cap_buff), max_max)
//! displayed = min(enhanced, soft_cap)
//! ```

use crate::config::{MovementConstants, SpeedConstants};
use crate::effect::EffectTotals;
use crate::types::EffectType;
use serde::{Deserialize, Serialize};

/// One movement mode in ft/s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedResult {
    pub base: f64,
    pub enhanced: f64,
    pub soft_cap: f64,
    pub displayed: f64,
}

impl SpeedResult {
    pub fn is_capped(&self) -> bool {
        self.enhanced > self.soft_cap
    }
}

pub fn calculate_speed(speed: &SpeedConstants, buff: f64, cap_buff: f64, min_buff: f64) -> SpeedResult {
    let enhanced = speed.base * (1.0 + buff.max(min_buff));
    let soft_cap = (speed.soft_cap * (1.0 + cap_buff)).min(speed.max_max);
    SpeedResult {
        base: speed.base,
        enhanced,
        soft_cap,
        displayed: enhanced.min(soft_cap),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementTotals {
    pub run: SpeedResult,
    pub jump: SpeedResult,
    pub fly: SpeedResult,
}

impl MovementTotals {
    pub fn from_totals(totals: &EffectTotals, constants: &MovementConstants) -> Self {
        let speed = |constants_for: &SpeedConstants, buff: EffectType, cap: EffectType| {
            calculate_speed(
                constants_for,
                totals.self_total(buff),
                totals.self_total(cap),
                constants.min_buff,
            )
        };
        MovementTotals {
            run: speed(&constants.run, EffectType::RunSpeed, EffectType::MaxRunSpeed),
            jump: speed(&constants.jump, EffectType::JumpSpeed, EffectType::MaxJumpSpeed),
            fly: speed(&constants.fly, EffectType::FlySpeed, EffectType::MaxFlySpeed),
        }
    }
}
