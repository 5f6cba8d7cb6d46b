//! Game configuration and its validation.
//!
//! A configuration is checked once when a game is created; after that nothing
//! in the engine can fail.
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_COLUMNS`: board width (default: 10)
//! - `BLOCKFALL_ROWS`: board height (default: 20)
//! - `BLOCKFALL_GRAVITY_MS`: gravity interval at level 1 (default: 1000)
//! - `BLOCKFALL_MIN_GRAVITY_MS`: gravity floor (default: 100)
//! - `BLOCKFALL_SEED`: piece randomizer seed (default: 1)

use std::env;
use std::str::FromStr;

use log::warn;
use thiserror::Error;

use crate::types::{
    DEFAULT_BASE_GRAVITY_MS, DEFAULT_COLUMNS, DEFAULT_LEVEL_SCORE_STEP, DEFAULT_MIN_GRAVITY_MS,
    DEFAULT_ROWS,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one column and one row (got {columns}x{rows})")]
    InvalidDimensions { columns: u16, rows: u16 },
    #[error("gravity interval must be positive")]
    ZeroGravityInterval,
    #[error("minimum gravity interval must be positive")]
    ZeroMinimumInterval,
    #[error("minimum gravity interval {min_ms}ms exceeds base interval {base_ms}ms")]
    MinimumAboveBase { base_ms: u32, min_ms: u32 },
    #[error("level score step must be positive")]
    ZeroLevelStep,
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub columns: u16,
    pub rows: u16,
    /// Gravity interval at level 1
    pub base_gravity_ms: u32,
    pub min_gravity_ms: u32,
    /// Cumulative score per level
    pub level_score_step: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            base_gravity_ms: DEFAULT_BASE_GRAVITY_MS,
            min_gravity_ms: DEFAULT_MIN_GRAVITY_MS,
            level_score_step: DEFAULT_LEVEL_SCORE_STEP,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Defaults with the three caller-facing knobs overridden, validated.
    pub fn new(columns: u16, rows: u16, base_gravity_ms: u32) -> Result<Self, ConfigError> {
        let config = Self {
            columns,
            rows,
            base_gravity_ms,
            min_gravity_ms: DEFAULT_MIN_GRAVITY_MS.min(base_gravity_ms.max(1)),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.base_gravity_ms == 0 {
            return Err(ConfigError::ZeroGravityInterval);
        }
        if self.min_gravity_ms == 0 {
            return Err(ConfigError::ZeroMinimumInterval);
        }
        if self.min_gravity_ms > self.base_gravity_ms {
            return Err(ConfigError::MinimumAboveBase {
                base_ms: self.base_gravity_ms,
                min_ms: self.min_gravity_ms,
            });
        }
        if self.level_score_step == 0 {
            return Err(ConfigError::ZeroLevelStep);
        }
        Ok(())
    }

    /// Load configuration from `BLOCKFALL_*` environment variables.
    ///
    /// Unset variables keep their defaults; a set but unparsable value is an
    /// error, as is a combination that fails [`EngineConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            columns: parse_var(&lookup, "BLOCKFALL_COLUMNS", defaults.columns)?,
            rows: parse_var(&lookup, "BLOCKFALL_ROWS", defaults.rows)?,
            base_gravity_ms: parse_var(&lookup, "BLOCKFALL_GRAVITY_MS", defaults.base_gravity_ms)?,
            min_gravity_ms: parse_var(
                &lookup,
                "BLOCKFALL_MIN_GRAVITY_MS",
                defaults.min_gravity_ms,
            )?,
            level_score_step: defaults.level_score_step,
            seed: parse_var(&lookup, "BLOCKFALL_SEED", defaults.seed)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(default);
    }
    value.parse().map_err(|_| {
        warn!("rejecting {var}={value:?}");
        ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn new_rejects_empty_board() {
        assert_eq!(
            EngineConfig::new(0, 20, 1000),
            Err(ConfigError::InvalidDimensions {
                columns: 0,
                rows: 20
            })
        );
        assert!(EngineConfig::new(10, 0, 1000).is_err());
    }

    #[test]
    fn new_rejects_zero_gravity() {
        assert_eq!(
            EngineConfig::new(10, 20, 0),
            Err(ConfigError::ZeroGravityInterval)
        );
    }

    #[test]
    fn new_clamps_floor_to_fast_base() {
        let config = EngineConfig::new(8, 4, 50).unwrap();
        assert_eq!(config.min_gravity_ms, 50);
    }

    #[test]
    fn minimum_above_base_is_rejected() {
        let config = EngineConfig {
            base_gravity_ms: 100,
            min_gravity_ms: 200,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MinimumAboveBase { .. })
        ));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("BLOCKFALL_COLUMNS", "8"),
            ("BLOCKFALL_ROWS", " 4 "),
            ("BLOCKFALL_SEED", "99"),
            ("BLOCKFALL_GRAVITY_MS", ""),
        ]))
        .unwrap();
        assert_eq!(config.columns, 8);
        assert_eq!(config.rows, 4);
        assert_eq!(config.seed, 99);
        assert_eq!(config.base_gravity_ms, DEFAULT_BASE_GRAVITY_MS);
    }

    #[test]
    fn lookup_rejects_garbage() {
        let err = EngineConfig::from_lookup(lookup_from(&[("BLOCKFALL_ROWS", "tall")]));
        assert_eq!(
            err,
            Err(ConfigError::InvalidEnv {
                var: "BLOCKFALL_ROWS",
                value: "tall".to_string()
            })
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let msg = ConfigError::InvalidDimensions {
            columns: 0,
            rows: 5,
        }
        .to_string();
        assert!(msg.contains("0x5"), "{msg}");
    }
}
