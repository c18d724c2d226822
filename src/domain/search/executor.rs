//! Query execution capability consumed by the search core

use async_trait::async_trait;

use super::query::{ContentQuery, CountQuery};
use super::summary::MemberTeamRow;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Executes composed member queries against a tabular store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemberQueryExecutor: Send + Sync {
    /// Runs the content query and returns rows in the query's order
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<MemberTeamRow>, DomainError>;

    /// Counts the member keys matching the query's predicates
    async fn count(&self, query: &CountQuery) -> Result<u64, DomainError>;
}
