//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};

/// Team identifier - surrogate key assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TeamId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Surrogate key
    id: TeamId,
    /// Display name, matched exactly by searches
    name: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Team {
    /// Build a stored team from its parts (used by storage backends)
    pub fn from_parts(id: TeamId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
        }
    }

    /// Assign an identity to a new team
    pub fn assign(id: TeamId, new_team: NewTeam) -> Self {
        Self {
            id,
            name: new_team.name,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Rename the team
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        self.name = name;
        Ok(())
    }
}
