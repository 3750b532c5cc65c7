//! ModifierTable - archetype x level scaling grid

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest and highest level a table row exists for
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 55;

/// Rectangular grid of scaling values
///
/// `rows[level - 1][column]`. Lookups outside the grid answer `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierTable {
    pub name: String,
    pub rows: Vec<Vec<f64>>,
}

impl ModifierTable {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Self {
        ModifierTable {
            name: name.into(),
            rows,
        }
    }

    /// Table where every level holds the same row
    pub fn uniform(name: impl Into<String>, row: Vec<f64>) -> Self {
        let rows = (MIN_LEVEL..=MAX_LEVEL).map(|_| row.clone()).collect();
        Self::new(name, rows)
    }

    /// Number of archetype columns (width of the widest row)
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Scaling value at (`level`, `column`), `0.0` outside the grid
    pub fn get(&self, level: u32, column: usize) -> f64 {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return 0.0;
        }
        self.rows
            .get((level - MIN_LEVEL) as usize)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Named modifier tables, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct ModifierTables {
    tables: HashMap<String, ModifierTable>,
}

impl ModifierTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: ModifierTable) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn with_table(mut self, table: ModifierTable) -> Self {
        self.insert(table);
        self
    }

    pub fn table(&self, name: &str) -> Option<&ModifierTable> {
        self.tables.get(name)
    }

    /// Scaling value from a named table, `0.0` for unknown tables
    pub fn get(&self, name: &str, level: u32, column: usize) -> f64 {
        match self.tables.get(name) {
            Some(table) => table.get(level, column),
            None => {
                tracing::trace!(table = name, "modifier table not loaded");
                0.0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<ModifierTable> for ModifierTables {
    fn from_iter<I: IntoIterator<Item = ModifierTable>>(iter: I) -> Self {
        let mut tables = ModifierTables::new();
        for table in iter {
            tables.insert(table);
        }
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melee_damage() -> ModifierTable {
        let rows = (MIN_LEVEL..=MAX_LEVEL)
            .map(|level| vec![level as f64, level as f64 * 0.8])
            .collect();
        ModifierTable::new("Melee_Damage", rows)
    }

    #[test]
    fn test_lookup_inside_grid() {
        let table = melee_damage();
        assert!((table.get(1, 0) - 1.0).abs() < f64::EPSILON);
        assert!((table.get(50, 1) - 40.0).abs() < 1e-12);
        assert!((table.get(55, 0) - 55.0).abs() < f64::EPSILON);
        assert_eq!(table.columns(), 2);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let table = melee_damage();
        assert!(table.get(0, 0).abs() < f64::EPSILON);
        assert!(table.get(56, 0).abs() < f64::EPSILON);
        assert!(table.get(10, 2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_table_is_zero_past_its_rows() {
        let table = ModifierTable::new("short", vec![vec![1.0], vec![2.0]]);
        assert!((table.get(2, 0) - 2.0).abs() < f64::EPSILON);
        assert!(table.get(3, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_table_is_zero() {
        let tables = ModifierTables::new().with_table(melee_damage());
        assert!(tables.get("Ranged_Damage", 50, 0).abs() < f64::EPSILON);
        assert!((tables.get("Melee_Damage", 50, 0) - 50.0).abs() < f64::EPSILON);
        assert_eq!(tables.len(), 1);
    }
}
