//! Member domain module

mod entity;
mod repository;
mod validation;

pub use entity::{Member, MemberId, NewMember};
pub use repository::{MemberBulkUpdate, MemberRepository};
pub use validation::{validate_age, validate_username, MemberValidationError};
