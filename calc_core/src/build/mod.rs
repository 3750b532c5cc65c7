//! Build-level aggregation
//!
//! Composes per-power stats with set bonuses, toggles and global buffs into
//! build-wide totals.

mod calculator;
mod movement;
mod power;
mod request;
mod result;
mod totals;
mod warning;

pub use calculator::BuildCalculator;
pub use movement::{calculate_speed, MovementTotals, SpeedResult};
pub use power::{caster_buffs, damage_buff_for, enhance_effect, PowerContext, PowerStats, PreparedPower};
pub use request::{BuildRequest, GlobalBuff, SlottedPower};
pub use result::BuildResult;
pub use totals::BuildTotals;
pub use warning::BuildWarning;
