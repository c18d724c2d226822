use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub paging: PagingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Member store selection and connection pool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Limits applied to paged search requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Used when a request carries no `limit`
    pub default_limit: u64,
    /// Requested limits above this are clamped
    pub max_limit: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let postgres = PostgresConfig::default();

        Self {
            backend: "memory".to_string(),
            url: postgres.url,
            max_connections: postgres.max_connections,
            min_connections: postgres.min_connections,
            connect_timeout_secs: postgres.connect_timeout_secs,
            idle_timeout_secs: postgres.idle_timeout_secs,
        }
    }
}

impl StorageSettings {
    /// Resolve the configured backend into a store configuration
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        let storage_type = StorageType::from_str(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", self.backend))
        })?;

        Ok(match storage_type {
            StorageType::InMemory => StorageConfig::in_memory(),
            StorageType::Postgres => StorageConfig::postgres(
                PostgresConfig::new(&self.url)
                    .with_max_connections(self.max_connections)
                    .with_min_connections(self.min_connections)
                    .with_connect_timeout(self.connect_timeout_secs)
                    .with_idle_timeout(self.idle_timeout_secs),
            ),
        })
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 2000,
        }
    }
}

impl PagingConfig {
    /// Effective limit for a request; non-positive values pass through so
    /// that paging validation can reject them
    pub fn resolve_limit(&self, requested: Option<i64>) -> i64 {
        let max = i64::try_from(self.max_limit).unwrap_or(i64::MAX);

        match requested {
            Some(limit) if limit > max => max,
            Some(limit) => limit,
            None => i64::try_from(self.default_limit).unwrap_or(max).min(max),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(json: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.paging.default_limit, 20);
        assert_eq!(config.paging.max_limit, 2000);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = from_json(
            r#"{ "logging": { "format": "json" }, "storage": { "backend": "postgres" } }"#,
        );

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.max_connections, 10);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_storage_settings_resolve_backend() {
        let memory = StorageSettings::default().to_storage_config().unwrap();
        assert_eq!(memory.storage_type(), StorageType::InMemory);

        let settings = StorageSettings {
            backend: "postgres".to_string(),
            url: "postgres://db/members".to_string(),
            max_connections: 4,
            ..Default::default()
        };
        match settings.to_storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://db/members");
                assert_eq!(pg.max_connections, 4);
            }
            other => panic!("Expected Postgres config, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_backend_is_configuration_error() {
        let settings = StorageSettings {
            backend: "cassandra".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            settings.to_storage_config(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_resolve_limit() {
        let paging = PagingConfig::default();

        assert_eq!(paging.resolve_limit(None), 20);
        assert_eq!(paging.resolve_limit(Some(3)), 3);
        assert_eq!(paging.resolve_limit(Some(5000)), 2000);
        assert_eq!(paging.resolve_limit(Some(0)), 0);
        assert_eq!(paging.resolve_limit(Some(-1)), -1);
    }
}
