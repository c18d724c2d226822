//! Member search service

use std::sync::Arc;

use tracing::debug;

use crate::domain::search::{
    describe, project, CountSkippingPageStrategy, MemberQuery, MemberQueryExecutor, MemberSearchCriteria,
    MemberSummary, Page, PageRequest, PageStrategy, SimplePageStrategy,
};
use crate::domain::DomainError;

/// Runs member searches against a query executor
///
/// `search` returns the full filtered list, `search_page` always counts and
/// `search_page_optimized` skips the count query when the window already
/// determines the total.
#[derive(Clone)]
pub struct MemberSearchService {
    executor: Arc<dyn MemberQueryExecutor>,
    simple: Arc<dyn PageStrategy>,
    optimized: Arc<dyn PageStrategy>,
}

impl std::fmt::Debug for MemberSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberSearchService").finish_non_exhaustive()
    }
}

impl MemberSearchService {
    pub fn new(executor: Arc<dyn MemberQueryExecutor>) -> Self {
        Self {
            simple: Arc::new(SimplePageStrategy::new(executor.clone())),
            optimized: Arc::new(CountSkippingPageStrategy::new(executor.clone())),
            executor,
        }
    }

    /// Every matching member, in member id order
    pub async fn search(
        &self,
        criteria: &MemberSearchCriteria,
    ) -> Result<Vec<MemberSummary>, DomainError> {
        let query = MemberQuery::compose(criteria);
        let rows = self.executor.fetch(&query.content()).await?;

        debug!(
            filter = %describe(query.predicates()),
            fetched = rows.len(),
            "Searched members"
        );

        Ok(project(rows))
    }

    /// One page of matching members with an unconditional count
    pub async fn search_page(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        self.simple.build_page(criteria, request).await
    }

    /// One page of matching members, counting only when required
    pub async fn search_page_optimized(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        self.optimized.build_page(criteria, request).await
    }
}
