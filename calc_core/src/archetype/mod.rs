//! Archetype records, modifier tables and caps

mod caps;
mod modifiers;

pub use caps::{ArchetypeCaps, CappedValue};
pub use modifiers::{ModifierTable, ModifierTables, MAX_LEVEL, MIN_LEVEL};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static description of one archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRecord {
    /// Unique identifier (e.g., "tanker")
    pub id: String,
    /// Display name
    pub name: String,
    /// Column of this archetype in every modifier table
    pub column: usize,
    /// Base hit points at level 50
    pub hit_points: f64,
    /// Optional per-level base hit point table (overrides `hit_points`)
    #[serde(default)]
    pub hit_points_table: Option<String>,
    #[serde(default = "default_base_regen")]
    pub base_regen: f64,
    #[serde(default = "default_base_recovery")]
    pub base_recovery: f64,
    #[serde(default = "default_base_threat")]
    pub base_threat: f64,
    /// Archetype multiplier on control magnitudes
    #[serde(default = "default_mez_scale")]
    pub mez_scale: f64,
    pub caps: ArchetypeCaps,
}

fn default_base_regen() -> f64 {
    1.0
}

fn default_base_recovery() -> f64 {
    1.67
}

fn default_base_threat() -> f64 {
    1.0
}

fn default_mez_scale() -> f64 {
    1.0
}

impl ArchetypeRecord {
    /// Base hit points at `level`
    pub fn base_hit_points(&self, tables: &ModifierTables, level: u32) -> f64 {
        match &self.hit_points_table {
            Some(name) => tables.get(name, level, self.column),
            None => self.hit_points,
        }
    }
}

/// Every archetype, keyed by id
#[derive(Debug, Clone, Default)]
pub struct ArchetypeTable {
    archetypes: HashMap<String, ArchetypeRecord>,
}

impl ArchetypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, archetype: ArchetypeRecord) {
        self.archetypes.insert(archetype.id.clone(), archetype);
    }

    pub fn get(&self, id: &str) -> Option<&ArchetypeRecord> {
        self.archetypes.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

impl FromIterator<ArchetypeRecord> for ArchetypeTable {
    fn from_iter<I: IntoIterator<Item = ArchetypeRecord>>(iter: I) -> Self {
        let mut table = ArchetypeTable::new();
        for archetype in iter {
            table.insert(archetype);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrapper() -> ArchetypeRecord {
        ArchetypeRecord {
            id: "scrapper".to_string(),
            name: "Scrapper".to_string(),
            column: 1,
            hit_points: 1338.6,
            hit_points_table: None,
            base_regen: 1.0,
            base_recovery: 1.67,
            base_threat: 3.0,
            mez_scale: 1.0,
            caps: ArchetypeCaps::default(),
        }
    }

    #[test]
    fn test_flat_hit_points() {
        let tables = ModifierTables::new();
        assert!((scrapper().base_hit_points(&tables, 50) - 1338.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_hit_points() {
        let mut archetype = scrapper();
        archetype.hit_points_table = Some("Base_HP".to_string());
        let tables = ModifierTables::new().with_table(ModifierTable::uniform("Base_HP", vec![1000.0, 1200.0]));
        assert!((archetype.base_hit_points(&tables, 20) - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_lookup_by_id() {
        let table: ArchetypeTable = vec![scrapper()].into_iter().collect();
        assert!(table.get("scrapper").is_some());
        assert!(table.get("tanker").is_none());
        assert_eq!(table.len(), 1);
    }
}
