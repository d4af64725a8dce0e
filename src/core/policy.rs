//! Minimum-attendance threshold policy.
//!
//! The threshold drives every risk and requirement computation. Out-of-range input is
//! clamped silently into `[0, 100]`; it is never rejected.

use crate::core::validation::ValidationError;

/// Lowest storable threshold
pub const MIN_THRESHOLD: u8 = 0;
/// Highest storable threshold
pub const MAX_THRESHOLD: u8 = 100;
/// Threshold used for users who never changed it
pub const DEFAULT_MIN_PERCENTAGE: u8 = 75;
/// Step between the thresholds offered as presets
pub const THRESHOLD_PRESET_STEP: u8 = 5;
/// Lowest threshold offered as a preset
pub const THRESHOLD_PRESET_FLOOR: u8 = 50;

/// Normalizes a threshold: rounds to the nearest integer, then clamps into `[0, 100]`.
///
/// # Errors
/// Returns [`ValidationError::InvalidThreshold`] for NaN or infinite input, which has no
/// value to clamp.
pub fn validate_threshold(value: f64) -> Result<u8, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidThreshold { value });
    }

    let clamped = value
        .round()
        .clamp(f64::from(MIN_THRESHOLD), f64::from(MAX_THRESHOLD));

    // Cast safety: clamped is an integer-valued float in [0, 100]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(clamped as u8)
}

/// Integer form of [`validate_threshold`], for values read back from storage.
#[must_use]
pub fn clamp_threshold(value: i64) -> u8 {
    let clamped = value.clamp(i64::from(MIN_THRESHOLD), i64::from(MAX_THRESHOLD));
    u8::try_from(clamped).unwrap_or(DEFAULT_MIN_PERCENTAGE)
}

/// Thresholds offered as presets: 50, 55, ..., 100.
pub fn threshold_presets() -> impl Iterator<Item = u8> {
    (THRESHOLD_PRESET_FLOOR..=MAX_THRESHOLD).step_by(usize::from(THRESHOLD_PRESET_STEP))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_clamps_high() {
        assert_eq!(validate_threshold(150.0), Ok(100));
    }

    #[test]
    fn test_threshold_clamps_low() {
        assert_eq!(validate_threshold(-10.0), Ok(0));
    }

    #[test]
    fn test_threshold_in_range_unchanged() {
        assert_eq!(validate_threshold(75.0), Ok(75));
        assert_eq!(validate_threshold(0.0), Ok(0));
        assert_eq!(validate_threshold(100.0), Ok(100));
    }

    #[test]
    fn test_threshold_rounds_fractions() {
        assert_eq!(validate_threshold(72.4), Ok(72));
        assert_eq!(validate_threshold(72.5), Ok(73));
        assert_eq!(validate_threshold(100.4), Ok(100));
    }

    #[test]
    fn test_threshold_rejects_non_finite() {
        assert!(matches!(
            validate_threshold(f64::NAN),
            Err(ValidationError::InvalidThreshold { .. })
        ));
        assert!(validate_threshold(f64::INFINITY).is_err());
    }

    #[test]
    fn test_clamp_threshold_integers() {
        assert_eq!(clamp_threshold(250), 100);
        assert_eq!(clamp_threshold(-3), 0);
        assert_eq!(clamp_threshold(80), 80);
    }

    #[test]
    fn test_threshold_presets() {
        let presets: Vec<u8> = threshold_presets().collect();
        assert_eq!(presets.first(), Some(&50));
        assert_eq!(presets.last(), Some(&100));
        assert_eq!(presets.len(), 11);
    }
}
