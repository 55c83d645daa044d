//! Editor configuration.
//!
//! # Responsibility
//! - Hold grid bounds and instruction text style.
//! - Load overrides from JSON with per-field defaults.
//!
//! # Invariants
//! - `1 <= min_dimension <= max_dimension`.
//! - Default dimensions lie inside the configured bounds.

use crate::instructions::InstructionStyle;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_MIN_DIMENSION: u32 = 1;
pub const DEFAULT_MAX_DIMENSION: u32 = 100;
pub const DEFAULT_ROWS: u32 = 10;
pub const DEFAULT_COLUMNS: u32 = 10;

/// Bounds applied when creating or resizing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartLimits {
    pub min_dimension: u32,
    pub max_dimension: u32,
    pub default_rows: u32,
    pub default_columns: u32,
}

impl Default for ChartLimits {
    fn default() -> Self {
        Self {
            min_dimension: DEFAULT_MIN_DIMENSION,
            max_dimension: DEFAULT_MAX_DIMENSION,
            default_rows: DEFAULT_ROWS,
            default_columns: DEFAULT_COLUMNS,
        }
    }
}

impl ChartLimits {
    /// Clamps one dimension into `[min_dimension, max_dimension]`.
    ///
    /// Total even for limits that fail [`ChartLimits::validate`]: the lower
    /// bound is at least 1 and the upper bound never drops below it.
    pub fn clamp(&self, value: u32) -> u32 {
        let min = self.min_dimension.max(1);
        let max = self.max_dimension.max(min);
        value.clamp(min, max)
    }

    /// Returns whether `value` lies inside the bounds without clamping.
    pub fn contains(&self, value: u32) -> bool {
        (self.min_dimension..=self.max_dimension).contains(&value)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dimension == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if self.min_dimension > self.max_dimension {
            return Err(ConfigError::InvertedBounds {
                min: self.min_dimension,
                max: self.max_dimension,
            });
        }
        for (field, value) in [
            ("default_rows", self.default_rows),
            ("default_columns", self.default_columns),
        ] {
            if !self.contains(value) {
                return Err(ConfigError::DefaultOutOfBounds { field, value });
            }
        }
        Ok(())
    }
}

/// Top-level configuration for chart editing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub limits: ChartLimits,
    pub instructions: InstructionStyle,
}

impl ChartConfig {
    /// Parses JSON overrides; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ZeroMinimum,
    InvertedBounds { min: u32, max: u32 },
    DefaultOutOfBounds { field: &'static str, value: u32 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid chart config: {err}"),
            Self::ZeroMinimum => write!(f, "min_dimension must be at least 1"),
            Self::InvertedBounds { min, max } => {
                write!(f, "min_dimension ({min}) must be <= max_dimension ({max})")
            }
            Self::DefaultOutOfBounds { field, value } => {
                write!(f, "{field} ({value}) lies outside dimension bounds")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ChartLimits, ConfigError};

    #[test]
    fn defaults_match_editor_bounds() {
        let limits = ChartLimits::default();
        assert_eq!(limits.clamp(0), 1);
        assert_eq!(limits.clamp(250), 100);
        assert_eq!(limits.clamp(42), 42);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn clamp_tolerates_unvalidated_limits() {
        let inverted = ChartLimits {
            min_dimension: 20,
            max_dimension: 5,
            ..ChartLimits::default()
        };
        assert!(inverted.validate().is_err());
        assert_eq!(inverted.clamp(10), 20);
        assert_eq!(inverted.clamp(u32::MAX), 20);

        let zero = ChartLimits {
            min_dimension: 0,
            max_dimension: 0,
            ..ChartLimits::default()
        };
        assert_eq!(zero.clamp(0), 1);
        assert_eq!(zero.clamp(7), 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json_str(r#"{"limits": {"max_dimension": 60}}"#)
            .expect("partial config should parse");
        assert_eq!(config.limits.max_dimension, 60);
        assert_eq!(config.limits.min_dimension, 1);
        assert_eq!(config.instructions.empty_row, "Empty row");
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = ChartConfig::from_json_str(
            r#"{"limits": {"min_dimension": 20, "max_dimension": 5, "default_rows": 5, "default_columns": 5}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { min: 20, max: 5 }));
    }

    #[test]
    fn rejects_default_outside_bounds() {
        let err = ChartConfig::from_json_str(r#"{"limits": {"max_dimension": 8}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DefaultOutOfBounds {
                field: "default_rows",
                value: 10
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ChartConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
