//! Engine configuration.
//!
//! `EngineConfig` fixes the precision policy for the approximate
//! operations (division, reciprocal, square root) and for π. A config is
//! chosen when an engine is created and never changes during a session.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::numeric::{Precision, Rounding, DEFAULT_SCALE, MAX_SCALE};

/// Precision settings for a calculator engine.
///
/// Fields missing from a serialized config take their default values.
///
/// # Examples
///
/// ```rust
/// use upncalc::{EngineConfig, numeric::Rounding};
///
/// let config = EngineConfig::from_json_str(r#"{ "division_scale": 4, "rounding": "half_even" }"#).unwrap();
/// assert_eq!(config.division_scale, 4);
/// assert_eq!(config.sqrt_scale, 16);
/// assert_eq!(config.rounding, Rounding::HalfEven);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fractional digits kept by division and reciprocal.
    pub division_scale: u32,

    /// Fractional digits kept by square root.
    pub sqrt_scale: u32,

    /// Fractional digits of the π constant.
    pub pi_scale: u32,

    /// Rounding mode for every approximate result.
    pub rounding: Rounding,
}

impl EngineConfig {
    /// Create the default configuration (16 fractional digits, half-up).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::InvalidConfig(e.to_string()))
    }

    /// Check that every scale fits the decimal type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::EngineConfig;
    ///
    /// let mut config = EngineConfig::new();
    /// config.sqrt_scale = 40;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("division_scale", self.division_scale),
            ("sqrt_scale", self.sqrt_scale),
            ("pi_scale", self.pi_scale),
        ];
        for (name, scale) in scales {
            if scale > MAX_SCALE {
                return Err(CalcError::InvalidConfig(format!(
                    "{} is {}, maximum is {}",
                    name, scale, MAX_SCALE
                )));
            }
        }
        Ok(())
    }

    /// Precision used by division and reciprocal.
    pub fn division(&self) -> Precision {
        Precision::new(self.division_scale, self.rounding)
    }

    /// Precision used by square root.
    pub fn sqrt(&self) -> Precision {
        Precision::new(self.sqrt_scale, self.rounding)
    }

    /// Precision of π.
    pub fn pi(&self) -> Precision {
        Precision::new(self.pi_scale, self.rounding)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            division_scale: DEFAULT_SCALE,
            sqrt_scale: DEFAULT_SCALE,
            pi_scale: DEFAULT_SCALE,
            rounding: Rounding::HalfUp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.division_scale, 16);
        assert_eq!(config.sqrt_scale, 16);
        assert_eq!(config.pi_scale, 16);
        assert_eq!(config.rounding, Rounding::HalfUp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            division_scale: 8,
            sqrt_scale: 10,
            pi_scale: 5,
            rounding: Rounding::Down,
        };
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"down\""));
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_oversized_scale() {
        let err = EngineConfig::from_json_str(r#"{ "pi_scale": 29 }"#).unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(ref msg) if msg.contains("pi_scale")));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json_str(r#"{ "rounding": "sideways" }"#).unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfig(_)));
    }

    #[test]
    fn test_precision_accessors() {
        let config = EngineConfig {
            division_scale: 2,
            sqrt_scale: 3,
            pi_scale: 4,
            rounding: Rounding::HalfEven,
        };
        assert_eq!(config.division().scale(), 2);
        assert_eq!(config.sqrt().scale(), 3);
        assert_eq!(config.pi().scale(), 4);
        assert_eq!(config.pi().rounding(), Rounding::HalfEven);
    }
}
