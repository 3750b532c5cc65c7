//! Level-difference scaling ("purple patch")
//!
//! `level_diff` is always target level minus caster level.

/// Base tohit by level difference, from -4 (index 0) to +7 (index 11)
const TOHIT_BY_DIFF: [f64; 12] = [
    0.95, 0.90, 0.85, 0.80, 0.75, 0.65, 0.56, 0.48, 0.39, 0.30, 0.20, 0.08,
];
const TOHIT_MIN_DIFF: i32 = -4;
const TOHIT_MAX_DIFF: i32 = 7;

/// Base chance to hit a target `level_diff` levels above the caster
///
/// 0.75 at even level, 0.95 at -4 and below, 0.08 at +7 and above.
pub fn scaling_tohit(level_diff: i32) -> f64 {
    let diff = level_diff.clamp(TOHIT_MIN_DIFF, TOHIT_MAX_DIFF);
    TOHIT_BY_DIFF[(diff - TOHIT_MIN_DIFF) as usize]
}

pub const MEZ_SCALE_FLOOR: f64 = 0.48;
pub const MEZ_SCALE_CEILING: f64 = 1.50;
const MEZ_SCALE_PER_LEVEL: f64 = 0.10;

/// Control magnitude/duration multiplier by level difference
///
/// Linear 10% per level from 1.0 at even level, kept inside
/// [0.48, 1.50].
pub fn mez_scale(level_diff: i32) -> f64 {
    (1.0 - MEZ_SCALE_PER_LEVEL * level_diff as f64).clamp(MEZ_SCALE_FLOOR, MEZ_SCALE_CEILING)
}
