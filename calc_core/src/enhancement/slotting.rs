//! Per-power enhancement totals

use super::{apply_ed, get_schedule, Schedule};
use crate::data::EnhancementRecord;
use crate::types::EnhanceAspect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One aspect's bonus before and after diminishing returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectBonus {
    pub aspect: EnhanceAspect,
    pub schedule: Schedule,
    /// Sum of the slotted bonuses
    pub raw: f64,
    /// After Enhancement Diversification
    pub effective: f64,
}

/// Summed enhancement bonuses of everything slotted in one power
#[derive(Debug, Clone, Default)]
pub struct EnhancementTotals {
    raw: BTreeMap<EnhanceAspect, f64>,
}

impl EnhancementTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum the bonuses of every slotted enhancement
    pub fn from_slotted<'a>(slotted: impl IntoIterator<Item = &'a EnhancementRecord>) -> Self {
        let mut totals = Self::new();
        for record in slotted {
            for bonus in &record.bonuses {
                totals.add(bonus.aspect, bonus.magnitude);
            }
        }
        totals
    }

    pub fn add(&mut self, aspect: EnhanceAspect, magnitude: f64) {
        *self.raw.entry(aspect).or_insert(0.0) += magnitude;
    }

    /// Raw sum for an aspect, zero when nothing enhances it
    pub fn raw(&self, aspect: EnhanceAspect) -> f64 {
        self.raw.get(&aspect).copied().unwrap_or(0.0)
    }

    /// Diminished total for an aspect
    pub fn effective(&self, aspect: EnhanceAspect) -> f64 {
        apply_ed(get_schedule(aspect), self.raw(aspect))
    }

    pub fn breakdown(&self) -> Vec<AspectBonus> {
        self.raw
            .iter()
            .map(|(aspect, raw)| AspectBonus {
                aspect: *aspect,
                schedule: get_schedule(*aspect),
                raw: *raw,
                effective: apply_ed(get_schedule(*aspect), *raw),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EnhancementBonus;

    fn single_origin(id: &str, aspect: EnhanceAspect, magnitude: f64) -> EnhancementRecord {
        EnhancementRecord {
            id: id.to_string(),
            name: id.to_string(),
            bonuses: vec![EnhancementBonus { aspect, magnitude }],
            min_level: 1,
            max_level: 55,
            unique: false,
            proc_effects: Vec::new(),
            set_id: None,
        }
    }

    #[test]
    fn test_three_recharge_sos() {
        let so = single_origin("recharge_so", EnhanceAspect::Recharge, 0.385);
        let totals = EnhancementTotals::from_slotted([&so, &so, &so]);
        assert!((totals.raw(EnhanceAspect::Recharge) - 1.155).abs() < 1e-9);
        assert!((totals.effective(EnhanceAspect::Recharge) - 0.97325).abs() < 1e-9);
    }

    #[test]
    fn test_missing_aspect_is_zero() {
        let totals = EnhancementTotals::new();
        assert!(totals.effective(EnhanceAspect::Damage).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dual_aspect_enhancement() {
        let mut record = single_origin("acc_dmg", EnhanceAspect::Accuracy, 0.265);
        record.bonuses.push(EnhancementBonus {
            aspect: EnhanceAspect::Damage,
            magnitude: 0.265,
        });
        let totals = EnhancementTotals::from_slotted([&record]);
        let breakdown = totals.breakdown();
        assert_eq!(breakdown.len(), 2);
        assert!(breakdown.iter().all(|b| (b.effective - 0.265).abs() < 1e-12));
    }
}
