//! Recharge time
//!
//! Only local slotting is diminished; global recharge is added on top
//! without Enhancement Diversification.
//!
//! ```text
//! local  = 1 + ED(Σ local)
//! global = 1 + global_bonus
//! actual = base / min(local × global, cap)
//! ```

use crate::archetype::CappedValue;
use crate::enhancement::{apply_ed, get_schedule};
use crate::types::EnhanceAspect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RechargeResult {
    pub base_recharge: f64,
    /// Summed local recharge enhancement before ED
    pub local_raw: f64,
    /// Local recharge enhancement after ED
    pub local_enhancement: f64,
    pub local_mult: f64,
    pub global_mult: f64,
    /// Combined multiplier before and after the archetype cap
    pub total_mult: CappedValue,
    pub actual_recharge: f64,
}

impl RechargeResult {
    pub fn summary(&self) -> String {
        format!(
            "{:.2}s -> {:.2}s (x{:.3} local, x{:.3} global)",
            self.base_recharge, self.actual_recharge, self.local_mult, self.global_mult
        )
    }
}

/// Recharge of a power with slotted and build-wide recharge
///
/// # Arguments
/// * `base_recharge` - The power's unenhanced recharge in seconds
/// * `local_raw` - Raw slotted recharge enhancement, diminished here
/// * `global_bonus` - Build-wide recharge bonus
/// * `recharge_cap` - The archetype's recharge multiplier cap
///
/// # Returns
/// The enhanced recharge and its components. A zero base recharge
/// (toggles, autos) stays zero.
pub fn calculate_recharge(
    base_recharge: f64,
    local_raw: f64,
    global_bonus: f64,
    recharge_cap: f64,
) -> RechargeResult {
    let local_enhancement = apply_ed(get_schedule(EnhanceAspect::Recharge), local_raw);
    let local_mult = 1.0 + local_enhancement;
    let global_mult = 1.0 + global_bonus;
    let total_mult = CappedValue::clamp(local_mult * global_mult, recharge_cap);

    let actual_recharge = if base_recharge <= 0.0 || total_mult.capped <= 0.0 {
        0.0
    } else {
        base_recharge / total_mult.capped
    };

    RechargeResult {
        base_recharge,
        local_raw,
        local_enhancement,
        local_mult,
        global_mult,
        total_mult,
        actual_recharge,
    }
}
