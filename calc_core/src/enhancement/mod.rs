//! Enhancement Diversification and slotting totals

mod schedule;
mod slotting;

pub use schedule::{apply_ed, get_schedule, Schedule, REGION_EFFICIENCY};
pub use slotting::{AspectBonus, EnhancementTotals};
