//! Runtime configuration.
//!
//! # Responsibility
//! - Deserialize desk settings from TOML.
//! - Translate settings into `StoreOptions` and logging parameters.
//!
//! # Invariants
//! - Every field has a default, so an empty document is a valid config.
//! - `notification_ttl_ms` is never zero.

use crate::logging::default_log_level;
use crate::repo::collection_repo::EmptyCollectionPolicy;
use crate::store::StoreOptions;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_NOTIFICATION_TTL_MS: u64 = 3_000;

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Desk settings as read from `techdesk.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    /// SQLite file; an in-memory database is used when unset.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub notification_ttl_ms: u64,
    /// Write `[]` for emptied collections instead of keeping the old snapshot.
    pub persist_empty_collections: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            persist_empty_collections: false,
        }
    }
}

impl DeskConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::Invalid(
                "notification_ttl_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            empty_policy: if self.persist_empty_collections {
                EmptyCollectionPolicy::PersistEmpty
            } else {
                EmptyCollectionPolicy::SkipEmpty
            },
            notification_ttl: Duration::from_millis(self.notification_ttl_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DeskConfig};
    use crate::repo::collection_repo::EmptyCollectionPolicy;
    use std::time::Duration;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DeskConfig::from_toml_str("").unwrap();
        assert_eq!(config, DeskConfig::default());
        let options = config.store_options();
        assert_eq!(options.empty_policy, EmptyCollectionPolicy::SkipEmpty);
        assert_eq!(options.notification_ttl, Duration::from_secs(3));
    }

    #[test]
    fn reads_all_fields() {
        let config = DeskConfig::from_toml_str(
            r#"
            db_path = "/var/lib/techdesk/desk.sqlite3"
            log_level = "warn"
            log_dir = "/var/log/techdesk"
            notification_ttl_ms = 1500
            persist_empty_collections = true
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.store_options().empty_policy,
            EmptyCollectionPolicy::PersistEmpty
        );
        assert_eq!(
            config.store_options().notification_ttl,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn zero_ttl_and_unknown_keys_are_rejected() {
        assert!(matches!(
            DeskConfig::from_toml_str("notification_ttl_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DeskConfig::from_toml_str("colour = \"blue\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
