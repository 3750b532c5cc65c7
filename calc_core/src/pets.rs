//! Pet-power inheritance
//!
//! Pets inherit the caster's accuracy and per-type damage buffs. Recharge,
//! defense, resistance and max HP buffs stay with the caster.
//!
//! ```text
//! final = base × (1 + pet_enhancement) × (1 + caster_buff[damage_type])
//! ```

use crate::damage::{DamageSummary, TypedDamage};
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a pet takes from its caster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CasterBuffs {
    /// Global accuracy buff
    pub accuracy: f64,
    /// Damage buff per damage type
    pub damage: BTreeMap<DamageType, f64>,
}

impl CasterBuffs {
    pub fn damage_buff(&self, damage_type: DamageType) -> f64 {
        self.damage.get(&damage_type).copied().unwrap_or(0.0)
    }
}

/// A pet power's numbers after inheritance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPowerResult {
    pub power_id: String,
    pub damages: Vec<TypedDamage>,
    /// Accuracy multiplier: pet enhancement × inherited accuracy
    pub accuracy_mult: f64,
}

impl PetPowerResult {
    pub fn total_damage(&self) -> f64 {
        self.damages.iter().map(|d| d.amount).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {:.2} damage, x{:.3} accuracy",
            self.power_id,
            self.total_damage(),
            self.accuracy_mult
        )
    }
}

/// Damage of one type after pet slotting and caster buffs
pub fn inherited_damage(base: f64, pet_enhancement: f64, caster_buff: f64) -> f64 {
    base * (1.0 + pet_enhancement) * (1.0 + caster_buff)
}

/// Accuracy multiplier after pet slotting and the caster's accuracy
pub fn inherited_accuracy(base_accuracy: f64, pet_enhancement: f64, caster_accuracy: f64) -> f64 {
    base_accuracy * (1.0 + pet_enhancement) * (1.0 + caster_accuracy)
}

/// Apply inheritance to a pet power's unbuffed damage
pub fn calculate_pet_power(
    power_id: &str,
    base: &DamageSummary,
    base_accuracy: f64,
    pet_damage_enhancement: f64,
    pet_accuracy_enhancement: f64,
    caster: &CasterBuffs,
) -> PetPowerResult {
    let damages = base
        .damages
        .iter()
        .map(|d| TypedDamage {
            damage_type: d.damage_type,
            amount: inherited_damage(
                d.amount,
                pet_damage_enhancement,
                caster.damage_buff(d.damage_type),
            ),
        })
        .collect();

    PetPowerResult {
        power_id: power_id.to_string(),
        damages,
        accuracy_mult: inherited_accuracy(base_accuracy, pet_accuracy_enhancement, caster.accuracy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caster() -> CasterBuffs {
        let mut damage = BTreeMap::new();
        damage.insert(DamageType::Fire, 0.5);
        CasterBuffs {
            accuracy: 0.2,
            damage,
        }
    }

    #[test]
    fn test_multiplicative_inheritance() {
        assert!((inherited_damage(100.0, 0.95, 0.5) - 292.5).abs() < 1e-9);
        assert!((inherited_accuracy(1.0, 0.95, 0.2) - 2.34).abs() < 1e-12);
    }

    #[test]
    fn test_unmatched_type_passes_through() {
        let mut base = DamageSummary::default();
        base.add_damage(DamageType::Fire, 100.0);
        base.add_damage(DamageType::Smashing, 40.0);

        let result = calculate_pet_power("fire_imp_bolt", &base, 1.0, 0.0, 0.0, &caster());
        let fire = result.damages.iter().find(|d| d.damage_type == DamageType::Fire).unwrap();
        let smash = result.damages.iter().find(|d| d.damage_type == DamageType::Smashing).unwrap();
        assert!((fire.amount - 150.0).abs() < 1e-9);
        assert!((smash.amount - 40.0).abs() < f64::EPSILON);
        assert!((result.total_damage() - 190.0).abs() < 1e-9);
        assert!((result.accuracy_mult - 1.2).abs() < 1e-12);
    }
}
