//! Application state for shared services

use std::sync::Arc;

use crate::config::PagingConfig;
use crate::infrastructure::member::{MemberSearchService, MemberService};
use crate::infrastructure::storage::MemberStores;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub member_service: Arc<MemberService>,
    pub search_service: Arc<MemberSearchService>,
    pub paging: PagingConfig,
}

impl AppState {
    pub fn new(
        member_service: Arc<MemberService>,
        search_service: Arc<MemberSearchService>,
        paging: PagingConfig,
    ) -> Self {
        Self {
            member_service,
            search_service,
            paging,
        }
    }

    /// Build both services on top of one store
    pub fn from_stores(stores: MemberStores, paging: PagingConfig) -> Self {
        Self::new(
            Arc::new(MemberService::new(stores.repository)),
            Arc::new(MemberSearchService::new(stores.executor)),
            paging,
        )
    }
}
