//! Bracket construction configuration.

use super::errors::{BracketError, BracketResult};
use std::env;
use std::str::FromStr;

/// Environment variable enabling strict result checking
pub const STRICT_RESULTS_VAR: &str = "PLAY_OFF_STRICT_RESULTS";

/// Environment variable bounding the seeding length
pub const MAX_SLOTS_VAR: &str = "PLAY_OFF_MAX_SLOTS";

/// Default upper bound on seeding length
pub const DEFAULT_MAX_SLOTS: usize = 4096;

/// Bracket construction configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketConfig {
    /// Reject results that no match in the bracket consumes
    pub strict_results: bool,

    /// Maximum number of leaf slots accepted by a build
    pub max_slots: usize,
}

impl BracketConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `PLAY_OFF_STRICT_RESULTS`: `true` or `false` (default: false)
    /// - `PLAY_OFF_MAX_SLOTS`: Maximum seeding length (default: 4096)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a variable is set but cannot be parsed, or
    /// if the resulting configuration fails [`BracketConfig::validate`].
    pub fn from_env() -> BracketResult<Self> {
        let config = Self::from_env_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Read the environment variables without validating the result
    ///
    /// Callers that layer their own overrides on top validate afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a variable is set but cannot be parsed.
    pub fn from_env_unvalidated() -> BracketResult<Self> {
        Ok(Self {
            strict_results: parse_env_or(STRICT_RESULTS_VAR, false)?,
            max_slots: parse_env_or(MAX_SLOTS_VAR, DEFAULT_MAX_SLOTS)?,
        })
    }

    /// Strict configuration with the default slot limit
    pub fn strict() -> Self {
        Self {
            strict_results: true,
            ..Self::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> BracketResult<()> {
        if !self.max_slots.is_power_of_two() {
            return Err(BracketError::InvalidConfig {
                var: MAX_SLOTS_VAR.to_string(),
                reason: format!("Must be a positive power of two, got {}", self.max_slots),
            });
        }

        Ok(())
    }
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            strict_results: false,
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset
///
/// # Errors
///
/// Returns `InvalidConfig` naming `key` if the variable is set but does not
/// parse as `T`.
pub fn parse_env_or<T>(key: &str, default: T) -> BracketResult<T>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| BracketError::InvalidConfig {
                var: key.to_string(),
                reason: format!("Cannot parse {value:?}"),
            }),
        Err(_) => Ok(default),
    }
}
