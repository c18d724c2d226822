//! Member service for entity and bulk operations

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::member::{validate_username, Member, MemberBulkUpdate, MemberId, NewMember};
use crate::domain::search::{build_predicates, MemberSearchCriteria, MemberSummary, MemberTeamRow};
use crate::domain::team::{NewTeam, Team, TeamId};
use crate::domain::{DomainError, MemberRepository};

/// Request for creating a new member
#[derive(Debug, Clone, Default)]
pub struct CreateMemberRequest {
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

/// Outcome of a demo data seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub teams: usize,
    pub members: usize,
}

/// Member service for managing members and teams
#[derive(Debug, Clone)]
pub struct MemberService {
    repository: Arc<dyn MemberRepository>,
}

impl MemberService {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    /// Create a new team
    pub async fn create_team(&self, name: &str) -> Result<Team, DomainError> {
        info!(name = %name, "Creating team");

        let team = NewTeam::new(name).map_err(|e| DomainError::validation(e.to_string()))?;
        self.repository.save_team(team).await
    }

    /// Get a team by ID
    pub async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        self.repository.get_team(id).await
    }

    /// Create a new member, optionally on an existing team
    pub async fn create_member(&self, request: CreateMemberRequest) -> Result<Member, DomainError> {
        info!(
            username = ?request.username,
            age = request.age,
            team_id = ?request.team_id.map(|id| id.value()),
            "Creating member"
        );

        let mut member = NewMember::new(request.username, request.age)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(team_id) = request.team_id {
            if self.repository.get_team(team_id).await?.is_none() {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team_id
                )));
            }
            member = member.with_team(team_id);
        }

        self.repository.save_member(member).await
    }

    /// Get a member by ID
    pub async fn get_member(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        self.repository.get_member(id).await
    }

    /// Get a member joined with its team, in search projection form
    pub async fn get_member_summary(
        &self,
        id: MemberId,
    ) -> Result<Option<MemberSummary>, DomainError> {
        let Some(member) = self.repository.get_member(id).await? else {
            return Ok(None);
        };

        let team = match member.team_id() {
            Some(team_id) => self.repository.get_team(team_id).await?,
            None => None,
        };

        Ok(Some(MemberSummary::from(MemberTeamRow {
            member_id: member.id(),
            username: member.username().map(str::to_string),
            age: member.age(),
            team_id: team.as_ref().map(Team::id),
            team_name: team.map(|t| t.name().to_string()),
        })))
    }

    /// Members with exactly this username
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError> {
        self.repository.find_by_username(username).await
    }

    /// Move a member to another team, or out of any team
    pub async fn change_team(
        &self,
        id: MemberId,
        team_id: Option<TeamId>,
    ) -> Result<Member, DomainError> {
        info!(id = %id, team_id = ?team_id.map(|t| t.value()), "Changing member team");

        let mut member = self
            .repository
            .get_member(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member '{}' not found", id)))?;

        if let Some(team_id) = team_id {
            if self.repository.get_team(team_id).await?.is_none() {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team_id
                )));
            }
        }

        member.change_team(team_id);
        self.repository.update_member(member).await
    }

    /// Apply a set-based update to every member matching the criteria
    pub async fn bulk_update(
        &self,
        criteria: &MemberSearchCriteria,
        update: &MemberBulkUpdate,
    ) -> Result<u64, DomainError> {
        if let MemberBulkUpdate::SetUsername { username } = update {
            validate_username(username).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let predicates = build_predicates(criteria);
        let affected = self.repository.bulk_update(&predicates, update).await?;

        info!(
            update = %update,
            predicates = predicates.len(),
            affected,
            "Bulk updated members"
        );

        Ok(affected)
    }

    /// Delete every member matching the criteria
    pub async fn bulk_delete(&self, criteria: &MemberSearchCriteria) -> Result<u64, DomainError> {
        let predicates = build_predicates(criteria);
        let affected = self.repository.bulk_delete(&predicates).await?;

        info!(predicates = predicates.len(), affected, "Bulk deleted members");

        Ok(affected)
    }

    /// Number of stored members
    pub async fn count_members(&self) -> Result<u64, DomainError> {
        self.repository.count_members().await
    }

    /// Insert the demo data set: `teamA` and `teamB` (reused when present)
    /// and `member1..=memberN` aged 1..=N on alternating teams
    pub async fn seed_demo(&self, count: usize) -> Result<SeedSummary, DomainError> {
        let mut teams = Vec::with_capacity(2);
        let mut created_teams = 0;

        for name in ["teamA", "teamB"] {
            let team = match self.repository.find_team_by_name(name).await? {
                Some(team) => team,
                None => {
                    created_teams += 1;
                    self.create_team(name).await?
                }
            };
            teams.push(team.id());
        }

        for i in 0..count {
            let age = i32::try_from(i + 1)
                .map_err(|_| DomainError::validation(format!("Seed count {} too large", count)))?;
            let member = NewMember::named(format!("member{}", i + 1), age)
                .map_err(|e| DomainError::validation(e.to_string()))?
                .with_team(teams[i % teams.len()]);

            self.repository.save_member(member).await?;
        }

        debug!(teams = created_teams, members = count, "Seeded demo data");

        Ok(SeedSummary {
            teams: created_teams,
            members: count,
        })
    }
}
