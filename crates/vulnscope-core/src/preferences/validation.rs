//! Preference validation and range clamping.
//!
//! The store applies these rules on every update and on load, so every
//! consumer observes a snapshot that honors the documented ranges even when
//! the persisted document was edited by hand.

use crate::preferences::errors::PreferencesError;
use crate::preferences::types::Preferences;

/// Minimum automatic refresh interval: 1 minute.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 60_000;

/// Maximum automatic refresh interval: 1 hour.
pub const MAX_REFRESH_INTERVAL_MS: u64 = 3_600_000;

/// Clamp a refresh interval into the documented range.
pub fn clamp_refresh_interval(interval_ms: u64) -> u64 {
    interval_ms.clamp(MIN_REFRESH_INTERVAL_MS, MAX_REFRESH_INTERVAL_MS)
}

/// Validate a full preferences record.
///
/// # Errors
///
/// Returns [`PreferencesError::InvalidValue`] when `refresh_interval_ms`
/// falls outside the documented range. Enum-valued options cannot hold
/// invalid values by construction.
pub fn validate_preferences(prefs: &Preferences) -> Result<(), PreferencesError> {
    if prefs.refresh_interval_ms < MIN_REFRESH_INTERVAL_MS
        || prefs.refresh_interval_ms > MAX_REFRESH_INTERVAL_MS
    {
        return Err(PreferencesError::InvalidValue {
            option: "refresh_interval_ms".to_string(),
            message: format!(
                "{} is outside the valid range {}..={}",
                prefs.refresh_interval_ms, MIN_REFRESH_INTERVAL_MS, MAX_REFRESH_INTERVAL_MS
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_below_minimum() {
        assert_eq!(clamp_refresh_interval(0), MIN_REFRESH_INTERVAL_MS);
        assert_eq!(clamp_refresh_interval(59_999), MIN_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn test_clamp_above_maximum() {
        assert_eq!(
            clamp_refresh_interval(3_600_001),
            MAX_REFRESH_INTERVAL_MS
        );
        assert_eq!(clamp_refresh_interval(u64::MAX), MAX_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn test_clamp_in_range_unchanged() {
        assert_eq!(clamp_refresh_interval(60_000), 60_000);
        assert_eq!(clamp_refresh_interval(300_000), 300_000);
        assert_eq!(clamp_refresh_interval(3_600_000), 3_600_000);
    }

    #[test]
    fn test_validate_default_preferences() {
        assert!(validate_preferences(&Preferences::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_interval() {
        let mut prefs = Preferences::default();
        prefs.refresh_interval_ms = 1_000;

        let error = validate_preferences(&prefs).unwrap_err();
        assert!(matches!(
            error,
            PreferencesError::InvalidValue { ref option, .. } if option == "refresh_interval_ms"
        ));
    }
}
