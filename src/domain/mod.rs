//! Domain layer - Core business logic and entities

pub mod error;
pub mod member;
pub mod search;
pub mod team;

pub use error::DomainError;
pub use member::{Member, MemberBulkUpdate, MemberId, MemberRepository, NewMember};
pub use search::{
    MemberQuery, MemberQueryExecutor, MemberSearchCriteria, MemberSummary, Page, PageRequest,
    PageStrategy, Sort,
};
pub use team::{NewTeam, Team, TeamId};
