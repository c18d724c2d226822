//! Member store factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::member::MemberRepository;
use crate::domain::search::MemberQueryExecutor;
use crate::domain::DomainError;

use super::in_memory::InMemoryMemberStore;
use super::postgres::{PostgresConfig, PostgresMemberStore};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// One backend seen through both of its capabilities
///
/// Both handles point at the same store, so writes made through the
/// repository are visible to searches.
#[derive(Clone)]
pub struct MemberStores {
    pub repository: Arc<dyn MemberRepository>,
    pub executor: Arc<dyn MemberQueryExecutor>,
}

impl std::fmt::Debug for MemberStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberStores")
            .field("repository", &self.repository)
            .finish()
    }
}

impl MemberStores {
    /// Wrap a single store that implements both capabilities
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: MemberRepository + MemberQueryExecutor + 'static,
    {
        Self {
            repository: store.clone(),
            executor: store,
        }
    }
}

/// Factory for creating member stores
#[derive(Debug)]
pub struct MemberStoreFactory;

impl MemberStoreFactory {
    /// Creates a store based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<MemberStores, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory member store");
                Ok(MemberStores::from_store(Self::create_in_memory()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL member store"
                );
                Ok(MemberStores::from_store(
                    Self::create_postgres(pg_config).await?,
                ))
            }
        }
    }

    pub fn create_in_memory() -> Arc<InMemoryMemberStore> {
        Arc::new(InMemoryMemberStore::new())
    }

    /// Connects and makes sure the schema exists
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> Result<Arc<PostgresMemberStore>, DomainError> {
        let store = PostgresMemberStore::connect(config).await?;
        store.ensure_schema().await?;
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::NewMember;
    use crate::domain::search::{MemberQuery, MemberSearchCriteria};

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from_str("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::from_str("sqlite"), None);
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::in_memory().storage_type(), StorageType::InMemory);
        let postgres = StorageConfig::postgres(PostgresConfig::new("postgres://localhost/test"));
        assert_eq!(postgres.storage_type(), StorageType::Postgres);
    }

    #[test]
    fn test_storage_config_postgres() {
        let config = PostgresConfig::new("postgres://localhost/test").with_max_connections(20);

        match StorageConfig::postgres(config) {
            StorageConfig::Postgres(pg_config) => {
                assert_eq!(pg_config.url, "postgres://localhost/test");
                assert_eq!(pg_config.max_connections, 20);
            }
            other => panic!("Expected Postgres config, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_in_memory_handles_share_state() {
        let stores = MemberStoreFactory::create(&StorageConfig::in_memory())
            .await
            .unwrap();

        stores
            .repository
            .save_member(NewMember::named("member1", 10).unwrap())
            .await
            .unwrap();

        let query = MemberQuery::compose(&MemberSearchCriteria::new());
        assert_eq!(stores.executor.count(&query.count()).await.unwrap(), 1);
    }
}
