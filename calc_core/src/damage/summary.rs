//! DamageSummary - the output of a power's damage calculation

use crate::config::DamageReturn;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// Damage of a single type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypedDamage {
    pub damage_type: DamageType,
    pub amount: f64,
}

/// Damage dealt by one activation of a power
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageSummary {
    /// Damage per type, in the order types were first seen
    pub damages: Vec<TypedDamage>,
    /// Share of the total coming from chance-based effects
    pub proc_damage: f64,
    /// Post-processing applied to `value`
    pub mode: DamageReturn,
    /// Total, DPS or DPA depending on `mode`
    pub value: f64,
}

impl Default for DamageSummary {
    fn default() -> Self {
        DamageSummary {
            damages: Vec::new(),
            proc_damage: 0.0,
            mode: DamageReturn::Total,
            value: 0.0,
        }
    }
}

impl DamageSummary {
    /// Total damage (sum of all types)
    pub fn total(&self) -> f64 {
        self.damages.iter().map(|d| d.amount).sum()
    }

    /// Damage of one type, zero when absent
    pub fn damage_of_type(&self, damage_type: DamageType) -> f64 {
        self.damages
            .iter()
            .filter(|d| d.damage_type == damage_type)
            .map(|d| d.amount)
            .sum()
    }

    /// Add damage of a type
    pub fn add_damage(&mut self, damage_type: DamageType, amount: f64) {
        if let Some(existing) = self.damages.iter_mut().find(|d| d.damage_type == damage_type) {
            existing.amount += amount;
        } else {
            self.damages.push(TypedDamage {
                damage_type,
                amount,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.damages.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No damage".to_string();
        }
        let parts: Vec<String> = self
            .damages
            .iter()
            .map(|d| format!("{:.2} {:?}", d.amount, d.damage_type))
            .collect();
        let label = match self.mode {
            DamageReturn::Total => "total",
            DamageReturn::Dps => "DPS",
            DamageReturn::Dpa => "DPA",
        };
        format!("{:.2} {} ({})", self.value, label, parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_damage_merges_types() {
        let mut summary = DamageSummary::default();
        summary.add_damage(DamageType::Fire, 30.0);
        summary.add_damage(DamageType::Smashing, 10.0);
        summary.add_damage(DamageType::Fire, 12.5);

        assert_eq!(summary.damages.len(), 2);
        assert!((summary.damage_of_type(DamageType::Fire) - 42.5).abs() < f64::EPSILON);
        assert!((summary.total() - 52.5).abs() < f64::EPSILON);
        assert!(summary.damage_of_type(DamageType::Cold).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_text() {
        let mut summary = DamageSummary::default();
        assert_eq!(summary.summary(), "No damage");
        summary.add_damage(DamageType::Fire, 62.56);
        summary.value = 62.56;
        assert_eq!(summary.summary(), "62.56 total (62.56 Fire)");
    }
}
