//! Game data loading

use super::{load_toml, parse_toml, ConfigError};
use crate::archetype::{ArchetypeRecord, ArchetypeTable, ModifierTable};
use crate::data::{EnhancementRecord, GameData, PowerRecord, SetBonusRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of a game data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDataFile {
    #[serde(default)]
    pub archetypes: Vec<ArchetypeRecord>,
    #[serde(default)]
    pub modifier_tables: Vec<ModifierTable>,
    #[serde(default)]
    pub powers: Vec<PowerRecord>,
    #[serde(default)]
    pub enhancements: Vec<EnhancementRecord>,
    #[serde(default)]
    pub set_bonuses: Vec<SetBonusRecord>,
}

impl GameDataFile {
    /// Check every record and freeze the result
    pub fn into_game_data(self) -> Result<GameData, ConfigError> {
        for archetype in &self.archetypes {
            validate_archetype(archetype)?;
        }
        for enhancement in &self.enhancements {
            if enhancement.min_level > enhancement.max_level {
                return Err(ConfigError::ValidationError(format!(
                    "enhancement {} has min level {} above max level {}",
                    enhancement.id, enhancement.min_level, enhancement.max_level
                )));
            }
        }
        for bonus in &self.set_bonuses {
            if bonus.pieces_required == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "set bonus {} requires zero pieces",
                    bonus.bonus_id
                )));
            }
        }

        let mut data = GameData::new();
        for archetype in self.archetypes {
            data = data.with_archetype(archetype);
        }
        for table in self.modifier_tables {
            data = data.with_table(table);
        }
        for power in self.powers {
            data = data.with_power(power);
        }
        for enhancement in self.enhancements {
            data = data.with_enhancement(enhancement);
        }
        for bonus in self.set_bonuses {
            data = data.with_set_bonus(bonus);
        }

        tracing::debug!(
            archetypes = data.archetypes.len(),
            tables = data.modifiers.len(),
            powers = data.power_count(),
            enhancements = data.enhancement_count(),
            "game data loaded"
        );
        Ok(data)
    }
}

fn validate_archetype(archetype: &ArchetypeRecord) -> Result<(), ConfigError> {
    let invalid = archetype.caps.invalid_fields();
    if !invalid.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "archetype {} has non-positive caps: {}",
            archetype.id,
            invalid.join(", ")
        )));
    }
    if archetype.hit_points <= 0.0 && archetype.hit_points_table.is_none() {
        return Err(ConfigError::ValidationError(format!(
            "archetype {} has no base hit points",
            archetype.id
        )));
    }
    if archetype.base_recovery <= 0.0 || archetype.base_regen <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "archetype {} has non-positive base regeneration or recovery",
            archetype.id
        )));
    }
    if archetype.mez_scale <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "archetype {} has non-positive mez scale",
            archetype.id
        )));
    }
    Ok(())
}

/// Load game data from a TOML file
pub fn load_game_data(path: &Path) -> Result<GameData, ConfigError> {
    let file: GameDataFile = load_toml(path)?;
    file.into_game_data()
}

/// Load game data from a TOML string
pub fn parse_game_data(content: &str) -> Result<GameData, ConfigError> {
    let file: GameDataFile = parse_toml(content)?;
    file.into_game_data()
}

/// Load archetypes from a TOML string
pub fn parse_archetypes(content: &str) -> Result<ArchetypeTable, ConfigError> {
    #[derive(Deserialize)]
    struct ArchetypesFile {
        archetypes: Vec<ArchetypeRecord>,
    }

    let file: ArchetypesFile = parse_toml(content)?;
    for archetype in &file.archetypes {
        validate_archetype(archetype)?;
    }
    Ok(file.archetypes.into_iter().collect())
}

/// The bundled archetype table
pub fn default_archetypes() -> Result<ArchetypeTable, ConfigError> {
    parse_archetypes(include_str!("../../config/archetypes.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_archetypes_load() {
        let table = default_archetypes().unwrap();
        assert_eq!(table.len(), 6);

        let tanker = table.get("tanker").unwrap();
        assert!((tanker.hit_points - 1606.0).abs() < f64::EPSILON);
        assert!((tanker.caps.resistance_cap - 0.9).abs() < f64::EPSILON);
        assert!((tanker.base_recovery - 1.67).abs() < f64::EPSILON);

        for id in ["tanker", "brute", "scrapper", "blaster", "defender", "controller"] {
            assert!(table.get(id).is_some(), "Missing archetype: {}", id);
        }
    }

    #[test]
    fn test_parse_game_data() {
        let toml = r#"
[[archetypes]]
id = "blaster"
name = "Blaster"
column = 2
hit_points = 1204.8

[archetypes.caps]
damage_cap = 5.0
resistance_cap = 0.75
defense_cap = 2.25
hp_cap = 1606.4
recovery_cap = 5.0
regeneration_cap = 20.0
recharge_cap = 5.0

[[modifier_tables]]
name = "Ranged_Damage"
rows = [[41.7, 62.56, 55.61]]

[[powers]]
id = "flares"
name = "Flares"
recharge_time = 2.0

[[powers.effects]]
effect_type = "damage"
damage_type = "fire"
modifier_table = "Ranged_Damage"
to_who = "target"

[[enhancements]]
id = "damage_so"
name = "Damage SO"

[[enhancements.bonuses]]
aspect = "damage"
magnitude = 0.333
"#;

        let data = parse_game_data(toml).unwrap();
        assert!(data.archetype("blaster").is_ok());
        assert!(data.power("flares").is_ok());
        assert!(data.enhancement("damage_so").is_ok());
        assert!((data.modifiers.get("Ranged_Damage", 1, 2) - 55.61).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_caps_rejected() {
        let toml = r#"
[[archetypes]]
id = "broken"
name = "Broken"
column = 0
hit_points = 1000.0

[archetypes.caps]
damage_cap = 0.0
resistance_cap = 0.75
defense_cap = 2.25
hp_cap = 1606.4
recovery_cap = 5.0
regeneration_cap = 20.0
recharge_cap = 5.0
"#;
        let err = parse_game_data(toml).unwrap_err();
        assert!(err.to_string().contains("damage_cap"));
    }
}
