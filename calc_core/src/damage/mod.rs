//! Damage system - per-type damage totals, procs, DPS and DPA

mod calculation;
mod summary;

pub use calculation::{
    calculate_damage, chance_weighted, damage_multiplier, expected_ticks, PowerTiming,
    MINIMUM_MODE_THRESHOLD,
};
pub use summary::{DamageSummary, TypedDamage};
