//! Predicate construction from sparse criteria
//!
//! Each criteria field maps to at most one predicate. Absent or blank fields
//! produce nothing; the surviving predicates are combined with AND.

use super::criteria::MemberSearchCriteria;
use super::summary::MemberTeamRow;

/// A single filter condition on the member/team relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    /// `member.username = value`
    UsernameEq(String),
    /// `team.name = value`, only satisfiable through the team join
    TeamNameEq(String),
    /// `member.age >= value`
    AgeGoe(i32),
    /// `member.age <= value`
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Whether evaluating this predicate needs the team table
    pub fn requires_team(&self) -> bool {
        matches!(self, Self::TeamNameEq(_))
    }

    /// Evaluate against a joined row
    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        match self {
            Self::UsernameEq(username) => row.username.as_deref() == Some(username.as_str()),
            Self::TeamNameEq(name) => row.team_name.as_deref() == Some(name.as_str()),
            Self::AgeGoe(age) => row.age >= *age,
            Self::AgeLoe(age) => row.age <= *age,
        }
    }
}

impl std::fmt::Display for MemberPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameEq(username) => write!(f, "member.username = '{}'", username),
            Self::TeamNameEq(name) => write!(f, "team.name = '{}'", name),
            Self::AgeGoe(age) => write!(f, "member.age >= {}", age),
            Self::AgeLoe(age) => write!(f, "member.age <= {}", age),
        }
    }
}

/// Build the predicate sequence for the given criteria, in field order
pub fn build_predicates(criteria: &MemberSearchCriteria) -> Vec<MemberPredicate> {
    [
        username_eq(criteria.username.as_deref()),
        team_name_eq(criteria.team_name.as_deref()),
        age_goe(criteria.age_goe),
        age_loe(criteria.age_loe),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// True when any predicate needs the team join
pub fn requires_team(predicates: &[MemberPredicate]) -> bool {
    predicates.iter().any(MemberPredicate::requires_team)
}

/// Render the predicates as one AND-ed condition for log output
pub fn describe(predicates: &[MemberPredicate]) -> String {
    if predicates.is_empty() {
        return "<all members>".to_string();
    }

    predicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// True when every predicate holds for the row (empty set matches all)
pub fn matches_all(predicates: &[MemberPredicate], row: &MemberTeamRow) -> bool {
    predicates.iter().all(|predicate| predicate.matches(row))
}

fn username_eq(username: Option<&str>) -> Option<MemberPredicate> {
    username
        .filter(|value| has_text(value))
        .map(|value| MemberPredicate::UsernameEq(value.to_string()))
}

fn team_name_eq(team_name: Option<&str>) -> Option<MemberPredicate> {
    team_name
        .filter(|value| has_text(value))
        .map(|value| MemberPredicate::TeamNameEq(value.to_string()))
}

fn age_goe(age: Option<i32>) -> Option<MemberPredicate> {
    age.map(MemberPredicate::AgeGoe)
}

fn age_loe(age: Option<i32>) -> Option<MemberPredicate> {
    age.map(MemberPredicate::AgeLoe)
}

/// Any non-whitespace character, using Unicode `White_Space`; U+00A0 and
/// U+2007 count as whitespace here
fn has_text(value: &str) -> bool {
    value.chars().any(|c| !c.is_whitespace())
}
