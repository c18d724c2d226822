//! Member search and management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{empty_as_none, ApiError, Json, Query};
use crate::config::PagingConfig;
use crate::domain::member::{Member, MemberBulkUpdate, MemberId};
use crate::domain::search::{MemberSearchCriteria, MemberSummary, Page, PageRequest, Sort};
use crate::domain::team::TeamId;
use crate::domain::DomainError;
use crate::infrastructure::member::CreateMemberRequest;

/// Search query string: criteria fields plus paging
///
/// An empty numeric value (`?ageGoe=`) counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub age_goe: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub age_loe: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    /// `field[:asc|desc]` entries separated by commas
    pub sort: Option<String>,
}

impl MemberSearchParams {
    fn criteria(&self) -> MemberSearchCriteria {
        MemberSearchCriteria {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        }
    }

    fn page_request(&self, paging: &PagingConfig) -> Result<PageRequest, ApiError> {
        let request = PageRequest::new(
            self.offset.unwrap_or(0),
            paging.resolve_limit(self.limit),
        )?;

        let sort = match self.sort.as_deref() {
            Some(sort) => Sort::parse(sort).map_err(|e| ApiError::from(e).with_param("sort"))?,
            None => Sort::unsorted(),
        };

        Ok(request.with_sort(sort))
    }
}

/// Page of member summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPageResponse {
    pub content: Vec<MemberSummary>,
    pub total_elements: u64,
    pub offset: u64,
    pub limit: u64,
    pub total_pages: u64,
    /// Zero-based page number containing `offset`
    pub number: u64,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
}

impl From<Page<MemberSummary>> for MemberPageResponse {
    fn from(page: Page<MemberSummary>) -> Self {
        Self {
            total_elements: page.total_elements(),
            offset: page.offset(),
            limit: page.limit(),
            total_pages: page.total_pages(),
            number: page.number(),
            first: page.is_first(),
            last: page.is_last(),
            has_next: page.has_next(),
            content: page.into_content(),
        }
    }
}

/// Request to create a member
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberApiRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub age: i32,
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Stored member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub created_at: String,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id().value(),
            username: member.username().map(String::from),
            age: member.age(),
            team_id: member.team_id().map(|id| id.value()),
            created_at: member.created_at().to_rfc3339(),
        }
    }
}

/// Request to move a member to another team; `null` removes the team
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTeamApiRequest {
    pub team_id: Option<i64>,
}

/// Filter plus change for a bulk update
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateApiRequest {
    #[serde(default)]
    pub criteria: MemberSearchCriteria,
    pub update: MemberBulkUpdate,
}

/// Filter for a bulk delete
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteApiRequest {
    #[serde(default)]
    pub criteria: MemberSearchCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResponse {
    pub affected: u64,
}

fn parse_member_id(raw: &str) -> Result<MemberId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(DomainError::invalid_id(format!(
            "Invalid member id '{}'",
            raw
        )))
    })
}

/// GET /v1/members
pub async fn search_members(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
) -> Result<Json<Vec<MemberSummary>>, ApiError> {
    let criteria = params.criteria();
    debug!(criteria = ?criteria, "Searching members");

    let members = state.search_service.search(&criteria).await?;

    Ok(Json(members))
}

/// GET /v2/members
pub async fn search_members_page(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
) -> Result<Json<MemberPageResponse>, ApiError> {
    let criteria = params.criteria();
    let request = params.page_request(&state.paging)?;
    debug!(
        criteria = ?criteria,
        offset = request.offset(),
        limit = request.limit(),
        "Searching member page"
    );

    let page = state.search_service.search_page(&criteria, &request).await?;

    Ok(Json(MemberPageResponse::from(page)))
}

/// GET /v3/members
pub async fn search_members_page_optimized(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
) -> Result<Json<MemberPageResponse>, ApiError> {
    let criteria = params.criteria();
    let request = params.page_request(&state.paging)?;
    debug!(
        criteria = ?criteria,
        offset = request.offset(),
        limit = request.limit(),
        "Searching member page"
    );

    let page = state
        .search_service
        .search_page_optimized(&criteria, &request)
        .await?;

    Ok(Json(MemberPageResponse::from(page)))
}

/// GET /members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberSummary>, ApiError> {
    let id = parse_member_id(&member_id)?;

    let member = state
        .member_service
        .get_member_summary(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member '{}' not found", id)))?;

    Ok(Json(member))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberApiRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let member = state
        .member_service
        .create_member(CreateMemberRequest {
            username: request.username,
            age: request.age,
            team_id: request.team_id.map(TeamId::new),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(&member))))
}

/// PUT /members/{member_id}/team
pub async fn change_member_team(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<ChangeTeamApiRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let id = parse_member_id(&member_id)?;

    let member = state
        .member_service
        .change_team(id, request.team_id.map(TeamId::new))
        .await?;

    Ok(Json(MemberResponse::from(&member)))
}

/// POST /members/bulk-update
pub async fn bulk_update_members(
    State(state): State<AppState>,
    Json(request): Json<BulkUpdateApiRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    let affected = state
        .member_service
        .bulk_update(&request.criteria, &request.update)
        .await?;

    Ok(Json(BulkResponse { affected }))
}

/// POST /members/bulk-delete
pub async fn bulk_delete_members(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteApiRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    let affected = state.member_service.bulk_delete(&request.criteria).await?;

    Ok(Json(BulkResponse { affected }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_to_criteria() {
        let params = MemberSearchParams {
            team_name: Some("teamB".to_string()),
            age_goe: Some(35),
            ..Default::default()
        };

        assert_eq!(
            params.criteria(),
            MemberSearchCriteria::new().with_team_name("teamB").with_age_goe(35)
        );
    }

    #[test]
    fn test_page_request_defaults_and_clamping() {
        let paging = PagingConfig::default();

        let request = MemberSearchParams::default().page_request(&paging).unwrap();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 20);
        assert!(request.sort().is_unsorted());

        let params = MemberSearchParams {
            limit: Some(1_000_000),
            ..Default::default()
        };
        assert_eq!(params.page_request(&paging).unwrap().limit(), 2000);
    }

    #[test]
    fn test_page_request_rejects_bad_input() {
        let paging = PagingConfig::default();

        for params in [
            MemberSearchParams {
                offset: Some(-1),
                ..Default::default()
            },
            MemberSearchParams {
                limit: Some(0),
                ..Default::default()
            },
            MemberSearchParams {
                sort: Some("salary:desc".to_string()),
                ..Default::default()
            },
        ] {
            let err = params.page_request(&paging).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_page_response_shape() {
        let request = PageRequest::new(0, 3).unwrap();
        let page = Page::new(Vec::<MemberSummary>::new(), &request, 4);

        let json = serde_json::to_value(MemberPageResponse::from(page)).unwrap();
        assert_eq!(json["totalElements"], 4);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["limit"], 3);
        assert!(json["content"].as_array().unwrap().is_empty());
    }
}
