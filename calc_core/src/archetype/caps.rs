//! ArchetypeCaps - per-archetype ceilings and the CappedValue pair

use serde::{Deserialize, Serialize};

/// Hard ceilings for one archetype
///
/// All values are multipliers or fractions (`5.0` = 500%, `0.9` = 90%),
/// except `hp_cap` which is absolute hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeCaps {
    /// Cap on the total damage multiplier (1 + buffs)
    pub damage_cap: f64,
    pub resistance_cap: f64,
    pub defense_cap: f64,
    pub hp_cap: f64,
    /// Cap on the recovery multiplier (1 + buffs)
    pub recovery_cap: f64,
    /// Cap on the regeneration multiplier (1 + buffs)
    pub regeneration_cap: f64,
    /// Cap on the recharge multiplier (local x global)
    pub recharge_cap: f64,
}

impl Default for ArchetypeCaps {
    fn default() -> Self {
        ArchetypeCaps {
            damage_cap: 4.0,
            resistance_cap: 0.75,
            defense_cap: 2.25,
            hp_cap: 2409.0,
            recovery_cap: 5.0,
            regeneration_cap: 20.0,
            recharge_cap: 5.0,
        }
    }
}

impl ArchetypeCaps {
    pub fn apply_damage_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.damage_cap)
    }

    pub fn apply_resistance_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.resistance_cap)
    }

    pub fn apply_defense_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.defense_cap)
    }

    pub fn apply_hp_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.hp_cap)
    }

    pub fn apply_recovery_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.recovery_cap)
    }

    pub fn apply_regeneration_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.regeneration_cap)
    }

    pub fn apply_recharge_cap(&self, value: f64) -> CappedValue {
        CappedValue::clamp(value, self.recharge_cap)
    }

    /// Names of caps that are not strictly positive
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        [
            ("damage_cap", self.damage_cap),
            ("resistance_cap", self.resistance_cap),
            ("defense_cap", self.defense_cap),
            ("hp_cap", self.hp_cap),
            ("recovery_cap", self.recovery_cap),
            ("regeneration_cap", self.regeneration_cap),
            ("recharge_cap", self.recharge_cap),
        ]
        .into_iter()
        .filter(|(_, value)| !(*value > 0.0))
        .map(|(name, _)| name)
        .collect()
    }
}

/// A value before and after its ceiling
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CappedValue {
    pub uncapped: f64,
    pub capped: f64,
}

impl CappedValue {
    /// `min(value, cap)`
    pub fn clamp(value: f64, cap: f64) -> Self {
        CappedValue {
            uncapped: value,
            capped: value.min(cap),
        }
    }

    /// A value no ceiling applies to
    pub fn uncapped(value: f64) -> Self {
        CappedValue {
            uncapped: value,
            capped: value,
        }
    }

    /// How much the cap removed, never negative
    pub fn excess(&self) -> f64 {
        self.uncapped - self.capped
    }

    pub fn was_clamped(&self) -> bool {
        self.capped < self.uncapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tanker() -> ArchetypeCaps {
        ArchetypeCaps {
            damage_cap: 4.0,
            resistance_cap: 0.9,
            defense_cap: 2.25,
            hp_cap: 3534.0,
            recovery_cap: 5.0,
            regeneration_cap: 25.0,
            recharge_cap: 5.0,
        }
    }

    #[test]
    fn test_within_cap_is_unchanged() {
        let capped = tanker().apply_resistance_cap(0.6);
        assert!((capped.capped - 0.6).abs() < f64::EPSILON);
        assert!(!capped.was_clamped());
        assert!(capped.excess().abs() < f64::EPSILON);
    }

    #[test]
    fn test_over_cap_is_clamped() {
        let capped = tanker().apply_resistance_cap(1.1);
        assert!((capped.capped - 0.9).abs() < f64::EPSILON);
        assert!(capped.was_clamped());
        assert!((capped.excess() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_each_cap_is_distinct() {
        let caps = tanker();
        assert!((caps.apply_hp_cap(5000.0).capped - 3534.0).abs() < f64::EPSILON);
        assert!((caps.apply_regeneration_cap(30.0).capped - 25.0).abs() < f64::EPSILON);
        assert!((caps.apply_recharge_cap(6.0).capped - 5.0).abs() < f64::EPSILON);
        assert!((caps.apply_damage_cap(4.5).capped - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_fields() {
        let mut caps = tanker();
        assert!(caps.invalid_fields().is_empty());
        caps.hp_cap = 0.0;
        caps.recharge_cap = -1.0;
        assert_eq!(caps.invalid_fields(), vec!["hp_cap", "recharge_cap"]);
    }
}
