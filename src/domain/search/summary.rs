//! Raw joined rows and their summary projection

use serde::{Deserialize, Serialize};

use crate::domain::member::MemberId;
use crate::domain::team::TeamId;

/// One row of `member LEFT JOIN team`; team columns are NULL when the
/// member has no team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamRow {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

/// Flattened, read-only view of a member and its team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: MemberId,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberSummary {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

/// Project fetched rows, preserving order
pub fn project(rows: Vec<MemberTeamRow>) -> Vec<MemberSummary> {
    rows.into_iter().map(MemberSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_with_team() {
        let summary = MemberSummary::from(MemberTeamRow {
            member_id: MemberId::new(4),
            username: Some("member4".to_string()),
            age: 40,
            team_id: Some(TeamId::new(2)),
            team_name: Some("teamB".to_string()),
        });

        assert_eq!(summary.id, MemberId::new(4));
        assert_eq!(summary.username.as_deref(), Some("member4"));
        assert_eq!(summary.age, 40);
        assert_eq!(summary.team_id, Some(TeamId::new(2)));
        assert_eq!(summary.team_name.as_deref(), Some("teamB"));
    }

    #[test]
    fn test_projection_without_team() {
        let summary = MemberSummary::from(MemberTeamRow {
            member_id: MemberId::new(5),
            username: Some("loner".to_string()),
            age: 50,
            team_id: None,
            team_name: None,
        });

        assert!(summary.team_id.is_none());
        assert!(summary.team_name.is_none());
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = MemberSummary {
            id: MemberId::new(1),
            username: Some("member1".to_string()),
            age: 10,
            team_id: None,
            team_name: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "username": "member1",
                "age": 10,
                "teamId": null,
                "teamName": null
            })
        );
    }

    #[test]
    fn test_project_keeps_order() {
        let rows = (1..=3)
            .rev()
            .map(|i| MemberTeamRow {
                member_id: MemberId::new(i),
                username: None,
                age: i as i32,
                team_id: None,
                team_name: None,
            })
            .collect();

        let ids: Vec<i64> = project(rows).iter().map(|s| s.id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
