//! Member search criteria

use serde::{Deserialize, Serialize};

/// Sparse search criteria. Every field is optional and absent fields impose
/// no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCriteria {
    /// Exact username match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Exact match on the joined team's name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Inclusive lower age bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_goe: Option<i32>,
    /// Inclusive upper age bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_loe: Option<i32>,
}

impl MemberSearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn with_age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn with_age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let criteria = MemberSearchCriteria::new()
            .with_username("member1")
            .with_team_name("teamA")
            .with_age_goe(10)
            .with_age_loe(20);

        assert_eq!(criteria.username.as_deref(), Some("member1"));
        assert_eq!(criteria.team_name.as_deref(), Some("teamA"));
        assert_eq!(criteria.age_goe, Some(10));
        assert_eq!(criteria.age_loe, Some(20));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let criteria: MemberSearchCriteria =
            serde_json::from_str(r#"{"teamName":"teamB","ageGoe":35}"#).unwrap();

        assert_eq!(criteria.team_name.as_deref(), Some("teamB"));
        assert_eq!(criteria.age_goe, Some(35));
        assert!(criteria.username.is_none());
        assert!(criteria.age_loe.is_none());
    }

    #[test]
    fn test_empty_serializes_to_empty_object() {
        let json = serde_json::to_string(&MemberSearchCriteria::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
