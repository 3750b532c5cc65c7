//! Control effects - mez magnitude, duration and knockback

mod knockback;
mod mez;

pub use knockback::{resolve_knockback, KnockbackOutcome, FEET_PER_MAGNITUDE};
pub use mez::{enhanced_duration, resisted_duration, stack_mezzes, MezEffect, MezOutcome};
