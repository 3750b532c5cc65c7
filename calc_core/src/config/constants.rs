//! Game constants configuration

use super::{load_toml, parse_toml, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub recovery: RecoveryConstants,
    #[serde(default)]
    pub hit_chance: HitChanceConstants,
    #[serde(default)]
    pub movement: MovementConstants,
    #[serde(default)]
    pub perception: PerceptionConstants,
    #[serde(default)]
    pub timing: TimingConstants,
    #[serde(default)]
    pub set_bonuses: SetBonusConstants,
}

impl GameConstants {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hit_chance.floor > self.hit_chance.ceiling {
            return Err(ConfigError::ValidationError(format!(
                "hit chance floor {} exceeds ceiling {}",
                self.hit_chance.floor, self.hit_chance.ceiling
            )));
        }
        if self.timing.enhancement_tick_interval <= 0.0 {
            return Err(ConfigError::ValidationError(
                "enhancement tick interval must be positive".to_string(),
            ));
        }
        for (name, speed) in [
            ("run", &self.movement.run),
            ("jump", &self.movement.jump),
            ("fly", &self.movement.fly),
        ] {
            if speed.soft_cap > speed.max_max {
                return Err(ConfigError::ValidationError(format!(
                    "{name} soft cap exceeds its MaxMax cap"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConstants {
    /// Converts regeneration/recovery multipliers to per-second figures
    #[serde(default = "default_numeric_scale")]
    pub numeric_scale: f64,
    /// Maximum endurance before bonuses
    #[serde(default = "default_base_max_endurance")]
    pub base_max_endurance: f64,
}

impl Default for RecoveryConstants {
    fn default() -> Self {
        RecoveryConstants {
            numeric_scale: 1.666667,
            base_max_endurance: 100.0,
        }
    }
}

fn default_numeric_scale() -> f64 {
    1.666667
}

fn default_base_max_endurance() -> f64 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitChanceConstants {
    #[serde(default = "default_floor")]
    pub floor: f64,
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
}

impl Default for HitChanceConstants {
    fn default() -> Self {
        HitChanceConstants {
            floor: 0.05,
            ceiling: 0.95,
        }
    }
}

fn default_floor() -> f64 {
    0.05
}

fn default_ceiling() -> f64 {
    0.95
}

/// Base speed, buff-adjustable soft cap and absolute cap, in ft/s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedConstants {
    pub base: f64,
    pub soft_cap: f64,
    pub max_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConstants {
    pub run: SpeedConstants,
    pub jump: SpeedConstants,
    pub fly: SpeedConstants,
    /// Lowest total speed buff (slows cannot take more than 90%)
    pub min_buff: f64,
}

impl Default for MovementConstants {
    fn default() -> Self {
        MovementConstants {
            run: SpeedConstants {
                base: 21.0,
                soft_cap: 87.98,
                max_max: 135.67,
            },
            jump: SpeedConstants {
                base: 21.0,
                soft_cap: 114.4,
                max_max: 166.0,
            },
            fly: SpeedConstants {
                base: 31.5,
                soft_cap: 86.02,
                max_max: 128.9,
            },
            min_buff: -0.9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConstants {
    /// Base perception radius in feet
    pub base: f64,
    pub cap: f64,
}

impl Default for PerceptionConstants {
    fn default() -> Self {
        PerceptionConstants {
            base: 500.0,
            cap: 1153.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConstants {
    /// Seconds between pulses of toggle enhancement-tick effects
    pub enhancement_tick_interval: f64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            enhancement_tick_interval: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetBonusConstants {
    /// Times the same set bonus may count toward a build
    pub rule_of_five: u32,
}

impl Default for SetBonusConstants {
    fn default() -> Self {
        SetBonusConstants { rule_of_five: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.recovery.numeric_scale - 1.666667).abs() < f64::EPSILON);
        assert!((constants.movement.run.base - 21.0).abs() < f64::EPSILON);
        assert!((constants.perception.cap - 1153.0).abs() < f64::EPSILON);
        assert_eq!(constants.set_bonuses.rule_of_five, 5);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[hit_chance]
floor = 0.1

[movement.run]
base = 25.0
soft_cap = 90.0
max_max = 140.0
"#;

        let constants = GameConstants::parse(toml).unwrap();
        assert!((constants.hit_chance.floor - 0.1).abs() < f64::EPSILON);
        assert!((constants.hit_chance.ceiling - 0.95).abs() < f64::EPSILON);
        assert!((constants.movement.run.base - 25.0).abs() < f64::EPSILON);
        assert!((constants.movement.fly.base - 31.5).abs() < f64::EPSILON);
        assert!((constants.timing.enhancement_tick_interval - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_hit_chance_rejected() {
        let toml = r#"
[hit_chance]
floor = 0.9
ceiling = 0.5
"#;
        assert!(matches!(
            GameConstants::parse(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
