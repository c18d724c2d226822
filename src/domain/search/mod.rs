//! Member search domain
//!
//! Sparse criteria become a predicate sequence, a per-call query description
//! and finally a page of projected rows. The store is reached only through
//! the `MemberQueryExecutor` capability.

mod count;
mod criteria;
mod executor;
mod paging;
mod predicate;
mod query;
mod strategy;
mod summary;

pub use count::{known_total, page_with_deferred_count};
pub use criteria::MemberSearchCriteria;
pub use executor::MemberQueryExecutor;
pub use paging::{Direction, Page, PageRequest, Sort, SortField, SortOrder};
pub use predicate::{build_predicates, describe, matches_all, requires_team, MemberPredicate};
pub use query::{ContentQuery, CountQuery, MemberQuery, Window};
pub use strategy::{CountSkippingPageStrategy, PageStrategy, SimplePageStrategy};
pub use summary::{project, MemberSummary, MemberTeamRow};

#[cfg(test)]
pub use executor::MockMemberQueryExecutor;
