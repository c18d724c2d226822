//! Interchangeable page-building strategies

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::count::page_with_deferred_count;
use super::criteria::MemberSearchCriteria;
use super::executor::MemberQueryExecutor;
use super::paging::{Page, PageRequest};
use super::query::MemberQuery;
use super::summary::{project, MemberSummary};
use crate::domain::DomainError;

/// Builds one page of member summaries for the given criteria
#[async_trait]
pub trait PageStrategy: Send + Sync {
    async fn build_page(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError>;
}

/// Fetches the window, then always runs the count query
pub struct SimplePageStrategy<E: ?Sized> {
    executor: Arc<E>,
}

impl<E: ?Sized> SimplePageStrategy<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }
}

impl<E: ?Sized> Debug for SimplePageStrategy<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplePageStrategy").finish()
    }
}

#[async_trait]
impl<E> PageStrategy for SimplePageStrategy<E>
where
    E: MemberQueryExecutor + ?Sized,
{
    async fn build_page(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        let query = MemberQuery::compose(criteria);

        let rows = self.executor.fetch(&query.page(request)).await?;
        let total = self.executor.count(&query.count()).await?;

        debug!(
            offset = request.offset(),
            limit = request.limit(),
            fetched = rows.len(),
            total,
            "Built page with unconditional count"
        );

        Ok(Page::new(project(rows), request, total))
    }
}

/// Fetches the window and only counts when the total cannot be derived
pub struct CountSkippingPageStrategy<E: ?Sized> {
    executor: Arc<E>,
}

impl<E: ?Sized> CountSkippingPageStrategy<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }
}

impl<E: ?Sized> Debug for CountSkippingPageStrategy<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountSkippingPageStrategy").finish()
    }
}

#[async_trait]
impl<E> PageStrategy for CountSkippingPageStrategy<E>
where
    E: MemberQueryExecutor + ?Sized,
{
    async fn build_page(
        &self,
        criteria: &MemberSearchCriteria,
        request: &PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        let query = MemberQuery::compose(criteria);

        let rows = self.executor.fetch(&query.page(request)).await?;
        let fetched = rows.len();

        let count_query = query.count();
        let mut counted = false;
        let page = page_with_deferred_count(project(rows), request, || {
            counted = true;
            self.executor.count(&count_query)
        })
        .await?;

        debug!(
            offset = request.offset(),
            limit = request.limit(),
            fetched,
            total = page.total_elements(),
            count_skipped = !counted,
            "Built page"
        );

        Ok(page)
    }
}
