//! Query composition
//!
//! A `MemberQuery` is built fresh for every call from the criteria. It hands
//! out a content query (`member LEFT JOIN team`, filtered, ordered, windowed)
//! and a count query that only projects the member key and only joins the
//! team table when a predicate needs it.

use std::cmp::Ordering;

use super::criteria::MemberSearchCriteria;
use super::paging::{Direction, PageRequest, SortField, SortOrder};
use super::predicate::{build_predicates, requires_team, MemberPredicate};
use super::summary::MemberTeamRow;

/// Offset/limit applied to the content query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Content query description: fixed projection of member and team columns
/// over `member LEFT OUTER JOIN team`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    predicates: Vec<MemberPredicate>,
    orders: Vec<SortOrder>,
    window: Option<Window>,
}

impl ContentQuery {
    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    /// Effective ordering, always ending with the member id tiebreaker
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Compare two rows under this query's ordering
    pub fn compare(&self, a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
        self.orders
            .iter()
            .map(|order| compare_by(order, a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Count query description: `COUNT(member.id)` over the same predicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    predicates: Vec<MemberPredicate>,
    join_team: bool,
}

impl CountQuery {
    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    /// Whether the team table has to be joined to evaluate the predicates
    pub fn joins_team(&self) -> bool {
        self.join_team
    }
}

/// Per-call composer for member searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    predicates: Vec<MemberPredicate>,
}

impl MemberQuery {
    pub fn compose(criteria: &MemberSearchCriteria) -> Self {
        Self {
            predicates: build_predicates(criteria),
        }
    }

    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    /// Unwindowed content query in default (member id) order
    pub fn content(&self) -> ContentQuery {
        ContentQuery {
            predicates: self.predicates.clone(),
            orders: effective_orders(&[]),
            window: None,
        }
    }

    /// Windowed content query honoring the requested sort
    pub fn page(&self, request: &PageRequest) -> ContentQuery {
        ContentQuery {
            predicates: self.predicates.clone(),
            orders: effective_orders(request.sort().orders()),
            window: Some(Window {
                offset: request.offset(),
                limit: request.limit(),
            }),
        }
    }

    pub fn count(&self) -> CountQuery {
        CountQuery {
            predicates: self.predicates.clone(),
            join_team: requires_team(&self.predicates),
        }
    }
}

fn effective_orders(requested: &[SortOrder]) -> Vec<SortOrder> {
    let mut orders = requested.to_vec();

    if !orders.iter().any(|order| order.field == SortField::Id) {
        orders.push(SortOrder::asc(SortField::Id));
    }

    orders
}

fn compare_by(order: &SortOrder, a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
    let ascending = match order.field {
        SortField::Id => a.member_id.cmp(&b.member_id),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Username => nulls_last(a.username.as_deref(), b.username.as_deref()),
        SortField::TeamName => nulls_last(a.team_name.as_deref(), b.team_name.as_deref()),
    };

    match order.direction {
        Direction::Asc => ascending,
        Direction::Desc => ascending.reverse(),
    }
}

fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}
