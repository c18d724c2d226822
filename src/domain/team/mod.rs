//! Team domain module
//!
//! Teams group members. A member references at most one team; the team does
//! not own its members and is never removed together with them.

mod entity;
mod validation;

pub use entity::{NewTeam, Team, TeamId};
pub use validation::{validate_team_name, TeamValidationError};
