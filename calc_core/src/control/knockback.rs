//! Knockback against knockback protection

use serde::{Deserialize, Serialize};

/// Feet travelled per point of net knockback magnitude
pub const FEET_PER_MAGNITUDE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnockbackOutcome {
    /// Protection absorbed the knock
    None,
    /// Target falls in place
    Knockdown,
    Knockback { distance: f64 },
}

impl KnockbackOutcome {
    pub fn distance(&self) -> f64 {
        match self {
            KnockbackOutcome::Knockback { distance } => *distance,
            _ => 0.0,
        }
    }
}

/// Resolve a knock of `magnitude` against `protection`
///
/// Negative protection always knocks down.
pub fn resolve_knockback(magnitude: f64, protection: f64) -> KnockbackOutcome {
    if protection < 0.0 {
        return KnockbackOutcome::Knockdown;
    }

    let net = magnitude - protection;
    if net <= 0.0 {
        KnockbackOutcome::None
    } else if net < 1.0 {
        KnockbackOutcome::Knockdown
    } else {
        KnockbackOutcome::Knockback {
            distance: net * FEET_PER_MAGNITUDE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_protected() {
        assert_eq!(resolve_knockback(4.0, 4.0), KnockbackOutcome::None);
        assert_eq!(resolve_knockback(2.0, 10.0), KnockbackOutcome::None);
    }

    #[test]
    fn test_knockdown_below_one() {
        assert_eq!(resolve_knockback(4.5, 4.0), KnockbackOutcome::Knockdown);
        assert!(resolve_knockback(4.5, 4.0).distance().abs() < f64::EPSILON);
    }

    #[test]
    fn test_knockback_distance() {
        let outcome = resolve_knockback(6.0, 2.0);
        assert_eq!(outcome, KnockbackOutcome::Knockback { distance: 40.0 });
        assert!((resolve_knockback(1.0, 0.0).distance() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_protection_knocks_down() {
        assert_eq!(resolve_knockback(8.0, -1.0), KnockbackOutcome::Knockdown);
        assert_eq!(resolve_knockback(0.0, -0.5), KnockbackOutcome::Knockdown);
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_string(&KnockbackOutcome::Knockdown).unwrap();
        assert_eq!(json, r#"{"kind":"knockdown"}"#);
    }
}
