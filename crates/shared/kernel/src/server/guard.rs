use super::error::ApiError;
use keel_domain::config::SettingsInner;
use keel_domain::features::FeatureSet;

/// Runtime check for endpoints of optional subsystems.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGuard;

impl FeatureGuard {
    /// Fails with [`ApiError::FeatureDisabled`] unless `feature` is switched on.
    pub fn require(settings: &SettingsInner, feature: FeatureSet) -> Result<(), ApiError> {
        if settings.is_enabled(feature) {
            return Ok(());
        }
        let name = feature.env_var().or_else(|| feature.name()).unwrap_or("unknown");
        Err(ApiError::FeatureDisabled { feature: name.into() })
    }

    /// Same as [`FeatureGuard::require`] with the flag named by its canonical name or its
    /// environment variable. Unknown names are treated as disabled.
    pub fn require_named(settings: &SettingsInner, name: &str) -> Result<(), ApiError> {
        let feature = FeatureSet::from(name);
        if feature.is_empty() {
            return Err(ApiError::FeatureDisabled { feature: name.to_owned().into() });
        }
        Self::require(settings, feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_ocr(enabled: bool) -> SettingsInner {
        SettingsInner { enable_ocr: enabled, ..SettingsInner::default() }
    }

    #[test]
    fn enabled_feature_passes() {
        assert!(FeatureGuard::require(&with_ocr(true), FeatureSet::OCR).is_ok());
        assert!(FeatureGuard::require_named(&with_ocr(true), "ENABLE_OCR").is_ok());
        assert!(FeatureGuard::require_named(&with_ocr(true), "ocr").is_ok());
    }

    #[test]
    fn disabled_feature_names_its_flag() {
        let err = FeatureGuard::require(&with_ocr(false), FeatureSet::OCR).unwrap_err();
        assert_eq!(err.to_string(), "Feature 'ENABLE_OCR' is not enabled");

        let err = FeatureGuard::require_named(&with_ocr(false), "ocr").unwrap_err();
        assert_eq!(err.to_string(), "Feature 'ENABLE_OCR' is not enabled");
    }

    #[test]
    fn unknown_feature_is_disabled() {
        let err = FeatureGuard::require_named(&with_ocr(true), "ENABLE_TELEPORT").unwrap_err();
        assert_eq!(err.to_string(), "Feature 'ENABLE_TELEPORT' is not enabled");
    }

    #[test]
    fn other_flags_do_not_leak() {
        assert!(FeatureGuard::require(&with_ocr(true), FeatureSet::STORAGE).is_err());
    }
}
