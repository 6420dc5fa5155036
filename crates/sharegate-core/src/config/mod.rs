//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate.
//! Each sub-module represents a logical configuration section, and every
//! field carries a serde default so that an empty source is a valid
//! configuration.

pub mod authorization;
pub mod directory;
pub mod logging;
pub mod sharing;

use serde::{Deserialize, Serialize};

pub use self::authorization::AuthorizationConfig;
pub use self::directory::DirectoryConfig;
pub use self::logging::LoggingConfig;
pub use self::sharing::SharingConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SHAREGATE";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default` + caller-supplied file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Share editing behavior.
    #[serde(default)]
    pub sharing: SharingConfig,
    /// Principal directory query settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Coarse-grained authorization grants.
    #[serde(default)]
    pub authorization: AuthorizationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default` (if present), the file at `path` (if
    /// present) and environment variables prefixed with `SHAREGATE__`,
    /// e.g. `SHAREGATE__SHARING__AVATAR_LIMIT=8`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("authorization.granted_actions")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        tracing::debug!(
            path,
            levels = loaded.sharing.selectable_levels.len(),
            grants = loaded.authorization.granted_actions.len(),
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.sharing.validate()?;
        self.directory.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sharing.avatar_limit, 5);
        assert_eq!(config.directory.default_sort, "created:desc");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.sharing.selectable_levels, vec![0, 1, 2, 4, 8]);
        assert!(config.sharing.reject_duplicates);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("config/does-not-exist").unwrap();
        assert_eq!(config.directory.page_size, 10);
    }
}
