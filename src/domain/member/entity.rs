//! Member entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_age, validate_username, MemberValidationError};
use crate::domain::team::TeamId;

/// Member identifier - surrogate key assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for MemberId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    username: Option<String>,
    age: i32,
    team_id: Option<TeamId>,
}

impl NewMember {
    pub fn new(username: Option<String>, age: i32) -> Result<Self, MemberValidationError> {
        if let Some(ref name) = username {
            validate_username(name)?;
        }
        validate_age(age)?;

        Ok(Self {
            username,
            age,
            team_id: None,
        })
    }

    /// Shorthand for a named member
    pub fn named(username: impl Into<String>, age: i32) -> Result<Self, MemberValidationError> {
        Self::new(Some(username.into()), age)
    }

    /// Place the member in a team (builder pattern)
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Surrogate key
    id: MemberId,
    /// Login name, may be absent
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    /// Age in years
    age: i32,
    /// Referenced team, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Member {
    /// Build a stored member from its parts (used by storage backends)
    pub fn from_parts(
        id: MemberId,
        username: Option<String>,
        age: i32,
        team_id: Option<TeamId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
            created_at,
        }
    }

    /// Assign an identity to a new member
    pub fn assign(id: MemberId, new_member: NewMember) -> Self {
        Self {
            id,
            username: new_member.username,
            age: new_member.age,
            team_id: new_member.team_id,
            created_at: Utc::now(),
        }
    }

    // Getters

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators

    pub fn set_username(&mut self, username: Option<String>) -> Result<(), MemberValidationError> {
        if let Some(ref name) = username {
            validate_username(name)?;
        }
        self.username = username;
        Ok(())
    }

    pub fn set_age(&mut self, age: i32) -> Result<(), MemberValidationError> {
        validate_age(age)?;
        self.age = age;
        Ok(())
    }

    /// Move the member to another team, or out of any team
    pub fn change_team(&mut self, team_id: Option<TeamId>) {
        self.team_id = team_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_parse() {
        let id: MemberId = "15".parse().unwrap();
        assert_eq!(id, MemberId::new(15));
        assert!("abc".parse::<MemberId>().is_err());
    }

    #[test]
    fn test_new_member_without_team() {
        let member = NewMember::named("member1", 10).unwrap();
        assert_eq!(member.username(), Some("member1"));
        assert_eq!(member.age(), 10);
        assert!(member.team_id().is_none());
    }

    #[test]
    fn test_new_member_with_team() {
        let member = NewMember::named("member1", 10)
            .unwrap()
            .with_team(TeamId::new(2));
        assert_eq!(member.team_id(), Some(TeamId::new(2)));
    }

    #[test]
    fn test_new_member_without_username() {
        let member = NewMember::new(None, 30).unwrap();
        assert!(member.username().is_none());
    }

    #[test]
    fn test_new_member_negative_age() {
        assert_eq!(
            NewMember::named("member1", -1),
            Err(MemberValidationError::NegativeAge(-1))
        );
    }

    #[test]
    fn test_member_mutators() {
        let mut member = Member::assign(MemberId::new(1), NewMember::named("member1", 10).unwrap());

        member.set_username(Some("renamed".to_string())).unwrap();
        member.set_age(11).unwrap();
        member.change_team(Some(TeamId::new(9)));

        assert_eq!(member.username(), Some("renamed"));
        assert_eq!(member.age(), 11);
        assert_eq!(member.team_id(), Some(TeamId::new(9)));

        assert!(member.set_age(-5).is_err());
        assert_eq!(member.age(), 11);
    }
}
