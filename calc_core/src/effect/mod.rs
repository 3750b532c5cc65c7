//! Effect model and aggregation

mod group;
mod model;
mod totals;

pub use group::{group, FxId, GroupedEffect};
pub use model::{Effect, EffectBuilder};
pub use totals::EffectTotals;
