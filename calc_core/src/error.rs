//! Calculation errors
//!
//! Only out-of-domain inputs fail. Table misses and resistance-driven
//! infinities are ordinary results, see the individual calculators.

use thiserror::Error;

/// Typed failure raised while constructing calculation inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("duration {0} is negative")]
    NegativeDuration(f64),
    #[error("scale {0} must be positive")]
    NonPositiveScale(f64),
    #[error("archetype scale {0} must be positive")]
    NonPositiveAtScale(f64),
    #[error("resistance {0} is outside [0, 1]")]
    ResistanceOutOfRange(f64),
    #[error("tick interval {0} must be positive")]
    InvalidTickInterval(f64),
    #[error("level {0} is outside 1..=55")]
    InvalidLevel(u32),
    #[error("unknown archetype: {0}")]
    UnknownArchetype(String),
    #[error("unknown power: {0}")]
    UnknownPower(String),
    #[error("unknown enhancement: {0}")]
    UnknownEnhancement(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::InvalidProbability(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = CalcError::UnknownPower("fire_blast".to_string());
        assert!(err.to_string().contains("fire_blast"));
    }
}
