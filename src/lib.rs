//! Member Search API
//!
//! Dynamic member/team search with:
//! - Sparse criteria composed into AND-ed predicates
//! - Offset/limit paging with an optional count-skipping strategy
//! - Set-based bulk update and delete
//! - In-memory and PostgreSQL storage backends

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::MemberStoreFactory;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let stores = MemberStoreFactory::create(&storage_config).await?;

    Ok(AppState::from_stores(stores, config.paging.clone()))
}
