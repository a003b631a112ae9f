//! CLI configuration management.
//!
//! Combines the bracket configuration from environment variables with the
//! command-line overrides. Overrides win over the environment, and the merged
//! result is validated once.

use play_off::bracket::config::parse_env_or;
use play_off::{BracketConfig, BracketResult};

/// Environment variable enabling pretty-printed output
pub const PRETTY_VAR: &str = "PO_CLI_PRETTY";

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Bracket construction configuration
    pub bracket: BracketConfig,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `strict_override` - Force strict result checking (from `--strict`)
    /// * `max_slots_override` - Optional slot limit (from `--max-slots`)
    /// * `pretty_override` - Force pretty output (from `--pretty`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a variable cannot be parsed or the final
    /// slot limit is not a positive power of two
    pub fn from_env(
        strict_override: bool,
        max_slots_override: Option<usize>,
        pretty_override: bool,
    ) -> BracketResult<Self> {
        let mut bracket = BracketConfig::from_env_unvalidated()?;

        if strict_override {
            bracket.strict_results = true;
        }
        if let Some(max_slots) = max_slots_override {
            bracket.max_slots = max_slots;
        }
        bracket.validate()?;
        let pretty_env = parse_env_or(PRETTY_VAR, false)?;

        Ok(Self {
            bracket,
            pretty: pretty_override || pretty_env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_off::BracketError;
    use play_off::bracket::config::{MAX_SLOTS_VAR, STRICT_RESULTS_VAR};
    use serial_test::serial;
    use std::env;

    fn set_env(key: &str, value: &str) {
        // SAFETY: env-mutating tests are serialized
        unsafe {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        // SAFETY: env-mutating tests are serialized
        unsafe {
            env::remove_var(MAX_SLOTS_VAR);
            env::remove_var(STRICT_RESULTS_VAR);
            env::remove_var(PRETTY_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_overrides_apply() {
        clear_env();
        let config = CliConfig::from_env(true, Some(16), true).unwrap();
        assert!(config.bracket.strict_results);
        assert_eq!(config.bracket.max_slots, 16);
        assert!(config.pretty);
    }

    #[test]
    #[serial]
    fn test_invalid_max_slots_override() {
        clear_env();
        let err = CliConfig::from_env(false, Some(10), false).unwrap_err();
        assert!(matches!(err, BracketError::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_max_slots_override_replaces_bad_env_value() {
        clear_env();
        set_env(MAX_SLOTS_VAR, "100");

        let config = CliConfig::from_env(false, Some(64), false).unwrap();
        assert_eq!(config.bracket.max_slots, 64);

        let err = CliConfig::from_env(false, None, false).unwrap_err();
        assert!(matches!(err, BracketError::InvalidConfig { .. }));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_pretty_from_env() {
        clear_env();
        set_env(PRETTY_VAR, "true");
        assert!(CliConfig::from_env(false, None, false).unwrap().pretty);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_pretty_is_rejected() {
        clear_env();
        set_env(PRETTY_VAR, "yes");

        let err = CliConfig::from_env(false, None, true).unwrap_err();
        match err {
            BracketError::InvalidConfig { var, .. } => assert_eq!(var, PRETTY_VAR),
            other => panic!("unexpected error: {other:?}"),
        }
        clear_env();
    }
}
