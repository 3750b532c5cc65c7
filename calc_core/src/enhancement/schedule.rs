//! Enhancement Diversification curves
//!
//! A raw enhancement total is split into four regions by three cumulative
//! thresholds. The regions keep 100%, 90%, 70% and 15% of their width:
//!
//! ```text
//! ed(x) = x                                       x <= t1
//!       = t1 + (x - t1) * 0.90                    t1 < x <= t2
//!       = t1 + (t2 - t1) * 0.90 + (x - t2) * 0.70 t2 < x <= t3
//!       = ...               + (x - t3) * 0.15     x > t3
//! ```

use crate::types::{EnhanceAspect, MezType};
use serde::{Deserialize, Serialize};

/// Efficiency of each region, first to last
pub const REGION_EFFICIENCY: [f64; 4] = [1.0, 0.90, 0.70, 0.15];

/// Named diminishing-returns curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    /// Damage, accuracy, recharge, most mez durations
    A,
    /// Defense, resistance, range, tohit
    B,
    /// Interrupt time
    C,
    /// Fear and confuse durations
    D,
}

impl Schedule {
    /// The three cumulative thresholds of this curve
    pub fn thresholds(self) -> [f64; 3] {
        match self {
            Schedule::A => [0.70, 0.90, 1.00],
            Schedule::B => [0.40, 0.50, 0.60],
            Schedule::C => [0.80, 1.00, 1.20],
            Schedule::D => [1.20, 1.50, 1.80],
        }
    }

    /// Diminished value of `raw_total` on this curve
    pub fn apply(self, raw_total: f64) -> f64 {
        apply_ed(self, raw_total)
    }
}

/// Diminish a raw enhancement total by `schedule`
pub fn apply_ed(schedule: Schedule, raw_total: f64) -> f64 {
    let [t1, t2, t3] = schedule.thresholds();
    if raw_total <= t1 {
        return raw_total;
    }

    let bounds = [0.0, t1, t2, t3, f64::INFINITY];
    let mut effective = 0.0;
    for (region, efficiency) in REGION_EFFICIENCY.iter().enumerate() {
        let low = bounds[region];
        let high = bounds[region + 1];
        if raw_total <= low {
            break;
        }
        effective += (raw_total.min(high) - low) * efficiency;
    }
    effective
}

/// Which curve diminishes enhancements of `aspect`
pub fn get_schedule(aspect: EnhanceAspect) -> Schedule {
    match aspect {
        EnhanceAspect::Defense
        | EnhanceAspect::Resistance
        | EnhanceAspect::Range
        | EnhanceAspect::ToHit => Schedule::B,
        EnhanceAspect::Interrupt => Schedule::C,
        EnhanceAspect::MezDuration(MezType::Confused | MezType::Terrorized) => Schedule::D,
        EnhanceAspect::Damage
        | EnhanceAspect::Accuracy
        | EnhanceAspect::Recharge
        | EnhanceAspect::EnduranceDiscount
        | EnhanceAspect::EnduranceModification
        | EnhanceAspect::Heal
        | EnhanceAspect::Movement
        | EnhanceAspect::MezDuration(_) => Schedule::A,
    }
}
