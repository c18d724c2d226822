//! In-memory member store

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::member::{Member, MemberBulkUpdate, MemberId, MemberRepository, NewMember};
use crate::domain::search::{
    matches_all, ContentQuery, CountQuery, MemberPredicate, MemberQueryExecutor, MemberTeamRow,
};
use crate::domain::team::{NewTeam, Team, TeamId};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct State {
    teams: BTreeMap<TeamId, Team>,
    members: BTreeMap<MemberId, Member>,
    next_team_id: i64,
    next_member_id: i64,
}

impl State {
    /// `member LEFT OUTER JOIN team`, in member id order
    fn joined_rows(&self) -> impl Iterator<Item = MemberTeamRow> + '_ {
        self.members.values().map(|member| {
            let team = member.team_id().and_then(|id| self.teams.get(&id));

            MemberTeamRow {
                member_id: member.id(),
                username: member.username().map(str::to_string),
                age: member.age(),
                team_id: team.map(Team::id),
                team_name: team.map(|t| t.name().to_string()),
            }
        })
    }

    fn matching_ids(&self, predicates: &[MemberPredicate]) -> Vec<MemberId> {
        self.joined_rows()
            .filter(|row| matches_all(predicates, row))
            .map(|row| row.member_id)
            .collect()
    }
}

/// Thread-safe in-memory store for members and teams
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    state: RwLock<State>,
}

impl InMemoryMemberStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberStore {
    async fn save_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut state = self.write()?;

        state.next_team_id += 1;
        let team = Team::assign(TeamId::new(state.next_team_id), team);
        state.teams.insert(team.id(), team.clone());

        Ok(team)
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn find_team_by_name(&self, name: &str) -> Result<Option<Team>, DomainError> {
        Ok(self
            .read()?
            .teams
            .values()
            .find(|team| team.name() == name)
            .cloned())
    }

    async fn save_member(&self, member: NewMember) -> Result<Member, DomainError> {
        let mut state = self.write()?;

        if let Some(team_id) = member.team_id() {
            if !state.teams.contains_key(&team_id) {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team_id
                )));
            }
        }

        state.next_member_id += 1;
        let member = Member::assign(MemberId::new(state.next_member_id), member);
        state.members.insert(member.id(), member.clone());

        Ok(member)
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.read()?.members.get(&id).cloned())
    }

    async fn update_member(&self, member: Member) -> Result<Member, DomainError> {
        let mut state = self.write()?;

        if let Some(team_id) = member.team_id() {
            if !state.teams.contains_key(&team_id) {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team_id
                )));
            }
        }

        match state.members.get_mut(&member.id()) {
            Some(stored) => {
                *stored = member.clone();
                Ok(member)
            }
            None => Err(DomainError::not_found(format!(
                "Member '{}' not found",
                member.id()
            ))),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, DomainError> {
        Ok(self
            .read()?
            .members
            .values()
            .filter(|member| member.username() == Some(username))
            .cloned()
            .collect())
    }

    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        Ok(self.read()?.members.values().cloned().collect())
    }

    async fn count_members(&self) -> Result<u64, DomainError> {
        Ok(self.read()?.members.len() as u64)
    }

    async fn bulk_update(
        &self,
        predicates: &[MemberPredicate],
        update: &MemberBulkUpdate,
    ) -> Result<u64, DomainError> {
        let mut state = self.write()?;
        let ids = state.matching_ids(predicates);

        // Stage every change first so a rejected row leaves the store untouched
        let mut staged = Vec::with_capacity(ids.len());
        for id in &ids {
            let Some(member) = state.members.get(id) else {
                continue;
            };
            let mut member = member.clone();

            match update {
                MemberBulkUpdate::SetUsername { username } => member
                    .set_username(Some(username.clone()))
                    .map_err(|e| DomainError::validation(e.to_string()))?,
                MemberBulkUpdate::AddAge { delta } => {
                    let age = member.age().checked_add(*delta).ok_or_else(|| {
                        DomainError::validation(format!("Age overflow for member '{}'", id))
                    })?;
                    member
                        .set_age(age)
                        .map_err(|e| DomainError::validation(e.to_string()))?;
                }
            }

            staged.push(member);
        }

        let changed = staged.len() as u64;
        for member in staged {
            state.members.insert(member.id(), member);
        }

        Ok(changed)
    }

    async fn bulk_delete(&self, predicates: &[MemberPredicate]) -> Result<u64, DomainError> {
        let mut state = self.write()?;
        let ids = state.matching_ids(predicates);

        for id in &ids {
            state.members.remove(id);
        }

        Ok(ids.len() as u64)
    }
}

#[async_trait]
impl MemberQueryExecutor for InMemoryMemberStore {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<MemberTeamRow>, DomainError> {
        let mut rows: Vec<MemberTeamRow> = self
            .read()?
            .joined_rows()
            .filter(|row| matches_all(query.predicates(), row))
            .collect();

        rows.sort_by(|a, b| query.compare(a, b));

        Ok(match query.window() {
            Some(window) => rows
                .into_iter()
                .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
                .collect(),
            None => rows,
        })
    }

    async fn count(&self, query: &CountQuery) -> Result<u64, DomainError> {
        Ok(self.read()?.matching_ids(query.predicates()).len() as u64)
    }
}
