//! Effective hit points
//!
//! ```text
//! chance_to_hit = max(0.05, enemy_tohit − defense)
//! ehp           = hp / (1 − resistance) / chance_to_hit
//! ```

use super::constants::MIN_CHANCE_TO_HIT;
use crate::error::CalcError;

/// Effective hit points against an enemy with `enemy_tohit`
///
/// # Arguments
/// * `hit_points` - The defender's maximum hit points
/// * `defense` - Defense against the incoming attack's category
/// * `resistance` - Resistance to the incoming damage type, in [0, 1]
/// * `enemy_tohit` - The attacker's base chance to hit
///
/// # Returns
/// Hit points scaled by mitigation, `f64::INFINITY` at full resistance, or
/// `ResistanceOutOfRange` when resistance lies outside [0, 1]
pub fn calculate_ehp(
    hit_points: f64,
    defense: f64,
    resistance: f64,
    enemy_tohit: f64,
) -> Result<f64, CalcError> {
    if !(0.0..=1.0).contains(&resistance) {
        return Err(CalcError::ResistanceOutOfRange(resistance));
    }
    if resistance >= 1.0 {
        return Ok(f64::INFINITY);
    }

    let chance_to_hit = (enemy_tohit - defense).max(MIN_CHANCE_TO_HIT);
    Ok(hit_points / (1.0 - resistance) / chance_to_hit)
}

/// Chance an enemy attack lands against `defense`
pub fn enemy_chance_to_hit(enemy_tohit: f64, defense: f64) -> f64 {
    (enemy_tohit - defense).max(MIN_CHANCE_TO_HIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_capped_defense_and_resistance() {
        // 0.5 - 0.45 = 0.05; 2000 / 0.25 / 0.05
        let ehp = calculate_ehp(2000.0, 0.45, 0.75, 0.5).unwrap();
        assert!((ehp - 160_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_mitigation() {
        let ehp = calculate_ehp(1606.0, 0.0, 0.0, 0.5).unwrap();
        assert!((ehp - 3212.0).abs() < 1e-9);
    }

    #[test]
    fn test_defense_past_floor_adds_nothing() {
        let at_floor = calculate_ehp(2000.0, 0.45, 0.0, 0.5).unwrap();
        let past_floor = calculate_ehp(2000.0, 0.70, 0.0, 0.5).unwrap();
        assert!((at_floor - past_floor).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_resistance_is_infinite() {
        let ehp = calculate_ehp(2000.0, 0.0, 1.0, 0.5).unwrap();
        assert!(ehp.is_infinite() && ehp > 0.0);
    }

    #[test]
    fn test_resistance_out_of_range_rejected() {
        assert_eq!(
            calculate_ehp(2000.0, 0.0, 1.2, 0.5),
            Err(CalcError::ResistanceOutOfRange(1.2))
        );
        assert!(calculate_ehp(2000.0, 0.0, -0.1, 0.5).is_err());
    }

    #[test]
    fn test_enemy_chance_to_hit() {
        assert!((enemy_chance_to_hit(0.5, 0.2) - 0.3).abs() < 1e-12);
        assert!((enemy_chance_to_hit(0.5, 0.6) - 0.05).abs() < f64::EPSILON);
    }
}
