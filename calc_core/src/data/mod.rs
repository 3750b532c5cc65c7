//! Game data records consumed by the engine
//!
//! The records are produced by the external import pipeline. `GameData`
//! bundles them once at startup; the calculators only ever borrow it.

mod enhancement;
mod power;

pub use enhancement::{EnhancementBonus, EnhancementRecord, SetBonusRecord};
pub use power::{EffectRecord, PowerRecord};

use crate::archetype::{ArchetypeRecord, ArchetypeTable, ModifierTable, ModifierTables};
use crate::error::CalcError;
use std::collections::HashMap;

/// Read-only game data shared by every calculation
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub archetypes: ArchetypeTable,
    pub modifiers: ModifierTables,
    powers: HashMap<String, PowerRecord>,
    enhancements: HashMap<String, EnhancementRecord>,
    set_bonuses: Vec<SetBonusRecord>,
}

impl GameData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archetype(mut self, archetype: ArchetypeRecord) -> Self {
        self.archetypes.insert(archetype);
        self
    }

    pub fn with_table(mut self, table: ModifierTable) -> Self {
        self.modifiers.insert(table);
        self
    }

    pub fn with_power(mut self, power: PowerRecord) -> Self {
        self.powers.insert(power.id.clone(), power);
        self
    }

    pub fn with_enhancement(mut self, enhancement: EnhancementRecord) -> Self {
        self.enhancements.insert(enhancement.id.clone(), enhancement);
        self
    }

    pub fn with_set_bonus(mut self, bonus: SetBonusRecord) -> Self {
        self.set_bonuses.push(bonus);
        self
    }

    pub fn archetype(&self, id: &str) -> Result<&ArchetypeRecord, CalcError> {
        self.archetypes
            .get(id)
            .ok_or_else(|| CalcError::UnknownArchetype(id.to_string()))
    }

    pub fn power(&self, id: &str) -> Result<&PowerRecord, CalcError> {
        self.powers
            .get(id)
            .ok_or_else(|| CalcError::UnknownPower(id.to_string()))
    }

    pub fn enhancement(&self, id: &str) -> Result<&EnhancementRecord, CalcError> {
        self.enhancements
            .get(id)
            .ok_or_else(|| CalcError::UnknownEnhancement(id.to_string()))
    }

    /// Set bonuses of `set_id`, ordered by pieces required
    pub fn set_bonuses(&self, set_id: &str) -> Vec<&SetBonusRecord> {
        let mut bonuses: Vec<&SetBonusRecord> = self
            .set_bonuses
            .iter()
            .filter(|b| b.set_id == set_id)
            .collect();
        bonuses.sort_by_key(|b| b.pieces_required);
        bonuses
    }

    pub fn power_count(&self) -> usize {
        self.powers.len()
    }

    pub fn enhancement_count(&self) -> usize {
        self.enhancements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerType;

    #[test]
    fn test_unknown_ids_are_typed_errors() {
        let data = GameData::new();
        assert_eq!(
            data.archetype("tanker").unwrap_err(),
            CalcError::UnknownArchetype("tanker".to_string())
        );
        assert!(matches!(data.power("x"), Err(CalcError::UnknownPower(_))));
        assert!(matches!(data.enhancement("x"), Err(CalcError::UnknownEnhancement(_))));
    }

    #[test]
    fn test_set_bonuses_sorted() {
        let data = GameData::new()
            .with_power(PowerRecord::new("brawl", PowerType::Click))
            .with_set_bonus(SetBonusRecord {
                set_id: "kinetic_combat".to_string(),
                pieces_required: 4,
                bonus_id: "def_melee_3_75".to_string(),
                effects: Vec::new(),
            })
            .with_set_bonus(SetBonusRecord {
                set_id: "kinetic_combat".to_string(),
                pieces_required: 2,
                bonus_id: "regen_12".to_string(),
                effects: Vec::new(),
            });
        let bonuses = data.set_bonuses("kinetic_combat");
        assert_eq!(bonuses.len(), 2);
        assert_eq!(bonuses[0].pieces_required, 2);
        assert_eq!(data.power_count(), 1);
    }
}
