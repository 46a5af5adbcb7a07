//! # Allocator Configuration
//!
//! Pool geometry, loaded once at startup. Usually lives in a TOML file:
//!
//! ```toml
//! pool_size = 2097152
//! max_outstanding = 64
//! ```

use crate::error::{RingError, RingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`RingAllocator`](crate::RingAllocator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    /// Pool capacity in bytes.
    pub pool_size: usize,
    /// Maximum number of simultaneously live allocations.
    pub max_outstanding: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            pool_size: 2 * 1024 * 1024, // 2MB scratch pool
            max_outstanding: 64,
        }
    }
}

impl RingConfig {
    /// Creates a config with explicit geometry.
    ///
    /// # Arguments
    ///
    /// * `pool_size` - Pool capacity in bytes
    /// * `max_outstanding` - Maximum live allocations
    #[inline]
    #[must_use]
    pub const fn new(pool_size: usize, max_outstanding: usize) -> Self {
        Self {
            pool_size,
            max_outstanding,
        }
    }

    /// Checks that both limits are positive.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] if either limit is zero.
    pub fn validate(&self) -> RingResult<()> {
        if self.pool_size == 0 {
            return Err(RingError::InvalidConfig("pool_size must be positive".into()));
        }
        if self.max_outstanding == 0 {
            return Err(RingError::InvalidConfig(
                "max_outstanding must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] on malformed TOML, unknown keys,
    /// or non-positive limits.
    pub fn from_toml_str(text: &str) -> RingResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| RingError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RingError::InvalidConfig`] if the file cannot be read or
    /// does not hold a valid config.
    pub fn load(path: impl AsRef<Path>) -> RingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RingError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pool_size, 2 * 1024 * 1024);
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(matches!(
            RingConfig::new(0, 4).validate(),
            Err(RingError::InvalidConfig(_))
        ));
        assert!(matches!(
            RingConfig::new(128, 0).validate(),
            Err(RingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = RingConfig::from_toml_str("pool_size = 4096\nmax_outstanding = 16\n").unwrap();
        assert_eq!(config, RingConfig::new(4096, 16));
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        // Unknown key
        assert!(RingConfig::from_toml_str("pool_size = 1\nmax_outstanding = 1\nalign = 8\n").is_err());
        // Missing key
        assert!(RingConfig::from_toml_str("pool_size = 1\n").is_err());
        // Zero pool
        assert!(RingConfig::from_toml_str("pool_size = 0\nmax_outstanding = 1\n").is_err());
    }
}
