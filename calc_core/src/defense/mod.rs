//! Defense system - typed/positional defense, resistance, DDR and EHP

mod ehp;
mod values;

pub use ehp::{calculate_ehp, enemy_chance_to_hit};
pub use values::{apply_defense_debuff, DefenseValues, ResistanceValues};

/// Defense calculation constants
pub mod constants {
    /// Lowest chance an enemy attack can have to land
    pub const MIN_CHANCE_TO_HIT: f64 = 0.05;
}
