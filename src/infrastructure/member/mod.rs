//! Member infrastructure services

mod search_service;
mod service;

pub use search_service::MemberSearchService;
pub use service::{CreateMemberRequest, MemberService, SeedSummary};
