//! Member repository trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::entity::{Member, MemberId, NewMember};
use crate::domain::search::MemberPredicate;
use crate::domain::team::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

/// Set-based change applied to every member matching a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MemberBulkUpdate {
    /// `SET username = value`
    SetUsername { username: String },
    /// `SET age = age + delta`
    AddAge { delta: i32 },
}

impl std::fmt::Display for MemberBulkUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetUsername { username } => write!(f, "username = '{}'", username),
            Self::AddAge { delta } => write!(f, "age = age + {}", delta),
        }
    }
}

/// Persistence for members and the teams they reference
#[async_trait]
pub trait MemberRepository: Send + Sync + std::fmt::Debug {
    /// Store a new team and assign its identity
    async fn save_team(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Get a team by ID
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// First team with exactly this name, lowest id first
    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, DomainError>;

    /// Store a new member; a referenced team must exist
    async fn save_member(&self, member: NewMember) -> Result<Member, DomainError>;

    /// Get a member by ID
    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, DomainError>;

    /// Overwrite username, age and team of an existing member
    async fn update_member(&self, member: Member) -> Result<Member, DomainError>;

    /// Members with exactly this username, in id order
    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError>;

    /// All members in id order
    async fn list_members(&self) -> Result<Vec<Member>, DomainError>;

    /// Number of stored members
    async fn count_members(&self) -> Result<u64, DomainError>;

    /// Apply `update` to every member matching all predicates; returns the
    /// number of rows changed
    async fn bulk_update(
        &self,
        predicates: &[MemberPredicate],
        update: &MemberBulkUpdate,
    ) -> Result<u64, DomainError>;

    /// Delete every member matching all predicates; teams are untouched
    async fn bulk_delete(&self, predicates: &[MemberPredicate]) -> Result<u64, DomainError>;
}
