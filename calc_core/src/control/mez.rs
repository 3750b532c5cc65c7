//! Mez magnitude, protection checks and duration
//!
//! ```text
//! effective = magnitude × scale × at_scale × table_scale
//! applies   = effective × purple_patch > protection
//! duration  = base × (1 + enhancement) × purple_patch × (1 − resistance)
//! ```
//!
//! Duration enhancement only exists for the mez types listed in
//! [`MezType::duration_enhanceable`].

use crate::error::CalcError;
use crate::purple_patch::mez_scale;
use crate::types::MezType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One control effect as it leaves the caster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MezEffect {
    mez_type: MezType,
    magnitude: f64,
    duration: f64,
    scale: f64,
    at_scale: f64,
    table_scale: f64,
    stacks: bool,
}

impl MezEffect {
    pub fn new(mez_type: MezType, magnitude: f64, duration: f64) -> Result<Self, CalcError> {
        if duration < 0.0 || duration.is_nan() {
            return Err(CalcError::NegativeDuration(duration));
        }
        Ok(MezEffect {
            mez_type,
            magnitude,
            duration,
            scale: 1.0,
            at_scale: 1.0,
            table_scale: 1.0,
            stacks: true,
        })
    }

    /// Power-side magnitude multiplier
    pub fn with_scale(mut self, scale: f64) -> Result<Self, CalcError> {
        if !(scale > 0.0) {
            return Err(CalcError::NonPositiveScale(scale));
        }
        self.scale = scale;
        Ok(self)
    }

    /// Archetype magnitude multiplier
    pub fn with_at_scale(mut self, at_scale: f64) -> Result<Self, CalcError> {
        if !(at_scale > 0.0) {
            return Err(CalcError::NonPositiveAtScale(at_scale));
        }
        self.at_scale = at_scale;
        Ok(self)
    }

    /// Modifier-table multiplier at the caster's level
    pub fn with_table_scale(mut self, table_scale: f64) -> Self {
        self.table_scale = table_scale;
        self
    }

    pub fn with_stacks(mut self, stacks: bool) -> Self {
        self.stacks = stacks;
        self
    }

    pub fn mez_type(&self) -> MezType {
        self.mez_type
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn stacks(&self) -> bool {
        self.stacks
    }

    pub fn effective_magnitude(&self) -> f64 {
        self.magnitude * self.scale * self.at_scale * self.table_scale
    }

    /// Whether this mez breaks through `protection` on a target
    /// `level_diff` levels above the caster
    ///
    /// Strictly greater: equal magnitude and protection never apply.
    pub fn applies(&self, level_diff: i32, protection: f64) -> bool {
        self.effective_magnitude() * mez_scale(level_diff) > protection
    }

    /// Full outcome against one target
    pub fn resolve(
        &self,
        level_diff: i32,
        protection: f64,
        duration_enhancement: f64,
        resistance: f64,
    ) -> Result<MezOutcome, CalcError> {
        let purple_patch = mez_scale(level_diff);
        let scaled_magnitude = self.effective_magnitude() * purple_patch;
        let applies = scaled_magnitude > protection;

        let enhanced = enhanced_duration(self.mez_type, self.duration, duration_enhancement);
        let duration = if applies {
            resisted_duration(enhanced * purple_patch, resistance)?
        } else {
            0.0
        };

        Ok(MezOutcome {
            mez_type: self.mez_type,
            effective_magnitude: self.effective_magnitude(),
            purple_patch,
            scaled_magnitude,
            protection,
            applies,
            enhanced_duration: enhanced,
            duration,
        })
    }
}

/// Result of one mez against one target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MezOutcome {
    pub mez_type: MezType,
    pub effective_magnitude: f64,
    pub purple_patch: f64,
    /// Effective magnitude after level scaling
    pub scaled_magnitude: f64,
    pub protection: f64,
    pub applies: bool,
    /// Duration after enhancement, before level scaling and resistance
    pub enhanced_duration: f64,
    /// Time the target spends mezzed, zero when the mez fails
    pub duration: f64,
}

impl MezOutcome {
    pub fn summary(&self) -> String {
        if self.applies {
            format!(
                "{:?} mag {:.2} vs {:.2} protection: {:.2}s",
                self.mez_type, self.scaled_magnitude, self.protection, self.duration
            )
        } else {
            format!(
                "{:?} mag {:.2} vs {:.2} protection: no effect",
                self.mez_type, self.scaled_magnitude, self.protection
            )
        }
    }
}

/// Duration after enhancement; unchanged for mezzes that cannot be enhanced
pub fn enhanced_duration(mez_type: MezType, base: f64, enhancement: f64) -> f64 {
    if mez_type.duration_enhanceable() {
        base * (1.0 + enhancement)
    } else {
        base
    }
}

/// Duration left after target resistance
///
/// Resistance shortens duration, never magnitude.
pub fn resisted_duration(duration: f64, resistance: f64) -> Result<f64, CalcError> {
    if !(0.0..=1.0).contains(&resistance) {
        return Err(CalcError::ResistanceOutOfRange(resistance));
    }
    Ok(duration * (1.0 - resistance))
}

/// Combined effective magnitude per mez type
///
/// Stacking sources add up. A non-stacking source only counts when it is
/// stronger than the stacked sum.
pub fn stack_mezzes(effects: &[MezEffect]) -> BTreeMap<MezType, f64> {
    let mut stacked: BTreeMap<MezType, f64> = BTreeMap::new();
    let mut single: BTreeMap<MezType, f64> = BTreeMap::new();

    for effect in effects {
        let magnitude = effect.effective_magnitude();
        if effect.stacks {
            *stacked.entry(effect.mez_type).or_insert(0.0) += magnitude;
        } else {
            let best = single.entry(effect.mez_type).or_insert(f64::NEG_INFINITY);
            *best = best.max(magnitude);
        }
    }

    for (mez_type, magnitude) in single {
        let total = stacked.entry(mez_type).or_insert(magnitude);
        *total = total.max(magnitude);
    }
    stacked
}
