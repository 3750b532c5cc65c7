//! Accuracy and tohit
//!
//! ```text
//! accuracy_mult  = base_accuracy × (1 + enhancement + accuracy_buff)
//! final_accuracy = accuracy_mult × (scaling_tohit + tohit_buff)
//! ```

use crate::config::HitChanceConstants;
use crate::purple_patch::scaling_tohit;
use serde::{Deserialize, Serialize};

/// Inputs for one power's accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyInput {
    pub base_accuracy: f64,
    /// Slotted accuracy after Enhancement Diversification
    pub enhancement: f64,
    pub global_accuracy_buff: f64,
    pub global_tohit_buff: f64,
    /// Target level minus caster level
    pub level_diff: i32,
    pub auto_hit: bool,
    pub ignore_accuracy_buffs: bool,
    pub ignore_tohit_buffs: bool,
}

impl Default for AccuracyInput {
    fn default() -> Self {
        AccuracyInput {
            base_accuracy: 1.0,
            enhancement: 0.0,
            global_accuracy_buff: 0.0,
            global_tohit_buff: 0.0,
            level_diff: 0,
            auto_hit: false,
            ignore_accuracy_buffs: false,
            ignore_tohit_buffs: false,
        }
    }
}

/// Accuracy of one power with its intermediate values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    pub auto_hit: bool,
    pub base_accuracy: f64,
    pub enhancement: f64,
    /// Global accuracy buff actually applied
    pub accuracy_buff: f64,
    /// Global tohit buff actually applied
    pub tohit_buff: f64,
    pub accuracy_mult: f64,
    pub scaling_tohit: f64,
    pub final_accuracy: f64,
}

impl AccuracyResult {
    /// Chance to hit an enemy with `enemy_defense`
    ///
    /// `final_accuracy − enemy_defense` clamped to the floor/ceiling.
    /// Auto-hit powers always answer `1.0`.
    pub fn hit_chance(&self, enemy_defense: f64, limits: &HitChanceConstants) -> f64 {
        if self.auto_hit {
            return 1.0;
        }
        (self.final_accuracy - enemy_defense).clamp(limits.floor, limits.ceiling)
    }

    /// Tohit half of the roll against `enemy_defense`, before accuracy
    pub fn tohit_chance(&self, enemy_defense: f64, limits: &HitChanceConstants) -> f64 {
        if self.auto_hit {
            return 1.0;
        }
        (self.scaling_tohit + self.tohit_buff - enemy_defense).clamp(limits.floor, limits.ceiling)
    }

    pub fn summary(&self) -> String {
        if self.auto_hit {
            return "Auto-hit".to_string();
        }
        format!(
            "Accuracy {:.2}% (x{:.3} accuracy, {:.2}% tohit)",
            self.final_accuracy * 100.0,
            self.accuracy_mult,
            (self.scaling_tohit + self.tohit_buff) * 100.0
        )
    }
}

/// Calculate the accuracy of one power
pub fn calculate_accuracy(input: &AccuracyInput) -> AccuracyResult {
    let tohit = scaling_tohit(input.level_diff);

    if input.auto_hit {
        return AccuracyResult {
            auto_hit: true,
            base_accuracy: input.base_accuracy,
            enhancement: input.enhancement,
            accuracy_buff: 0.0,
            tohit_buff: 0.0,
            accuracy_mult: 1.0,
            scaling_tohit: tohit,
            final_accuracy: 1.0,
        };
    }

    let accuracy_buff = if input.ignore_accuracy_buffs {
        0.0
    } else {
        input.global_accuracy_buff
    };
    let tohit_buff = if input.ignore_tohit_buffs {
        0.0
    } else {
        input.global_tohit_buff
    };

    let accuracy_mult = input.base_accuracy * (1.0 + input.enhancement + accuracy_buff);
    let final_accuracy = accuracy_mult * (tohit + tohit_buff);

    AccuracyResult {
        auto_hit: false,
        base_accuracy: input.base_accuracy,
        enhancement: input.enhancement,
        accuracy_buff,
        tohit_buff,
        accuracy_mult,
        scaling_tohit: tohit,
        final_accuracy,
    }
}
