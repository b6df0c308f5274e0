//! Dashboard configuration.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::motion::SpringConfig;
use crate::route::Mode;
use crate::theme::ColorMode;

/// Dashboard configuration.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint URL used when the session has none stored yet.
    pub default_endpoint_url: String,

    /// Running-status poll interval (milliseconds).
    pub status_poll_interval_ms: u64,

    /// Interval between spring animation ticks (milliseconds).
    pub frame_interval_ms: u64,

    /// Spring used for the vertical logo offset.
    pub spring: SpringConfig,

    /// Initial language tag.
    pub default_language: String,

    /// Initial color mode.
    pub default_color_mode: ColorMode,

    /// Initial application mode.
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_endpoint_url: String::new(),
            status_poll_interval_ms: 5000,
            frame_interval_ms: 16,
            spring: SpringConfig::default(),
            default_language: crate::i18n::LANG_EN.to_string(),
            default_color_mode: ColorMode::default(),
            default_mode: Mode::default(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check intervals and spring parameters.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.status_poll_interval_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "status_poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "frame_interval_ms must be positive".to_string(),
            ));
        }
        self.spring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(
            r#"{"status_poll_interval_ms": 1000, "default_mode": "advanced", "spring": {"stiffness": 300}}"#,
        )
        .unwrap();

        assert_eq!(config.status_poll_interval_ms, 1000);
        assert_eq!(config.default_mode, Mode::Advanced);
        assert_eq!(config.spring.stiffness, 300.0);
        assert_eq!(config.spring.damping, SpringConfig::default().damping);
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[test]
    fn test_rejects_zero_mass() {
        let err = Config::from_json(r#"{"spring": {"mass": 0}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
        assert!(err.to_string().contains("spring.mass"), "{err}");
    }

    #[test]
    fn test_rejects_non_positive_stiffness() {
        let err = Config::from_json(r#"{"spring": {"stiffness": -10}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_negative_damping() {
        let err = Config::from_json(r#"{"spring": {"damping": -1}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_non_finite_spring() {
        // JSON has no NaN literal, so build the value directly.
        let mut config = Config::default();
        config.spring.mass = f64::NAN;
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let err = Config::from_json(r#"{"status_poll_interval_ms": 0}"#).unwrap_err();
        assert!(err.to_string().contains("status_poll_interval_ms"), "{err}");
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        let err = Config::from_json(r#"{"frame_interval_ms": 0}"#).unwrap_err();
        assert!(err.to_string().contains("frame_interval_ms"), "{err}");
    }
}
