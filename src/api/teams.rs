//! Team endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::{Team, TeamId};

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
}

/// Stored team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().value(),
            name: team.name().to_string(),
            created_at: team.created_at().to_rfc3339(),
        }
    }
}

/// POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(name = %request.name, "Creating team");

    let team = state.member_service.create_team(&request.name).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state
        .member_service
        .get_team(TeamId::new(team_id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(TeamResponse::from(&team)))
}
