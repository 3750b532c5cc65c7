//! Configuration loading from TOML files

mod constants;
mod data_file;
mod settings;

pub use constants::{
    GameConstants, HitChanceConstants, MovementConstants, PerceptionConstants,
    RecoveryConstants, SetBonusConstants, SpeedConstants, TimingConstants,
};
pub use data_file::{default_archetypes, load_game_data, parse_archetypes, parse_game_data, GameDataFile};
pub use settings::{CalcSettings, DamageReturn, ProcMode};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
