use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::members;
use super::state::AppState;
use super::teams;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Search: plain list, always-counted page, count-skipping page
        .route("/v1/members", get(members::search_members))
        .route("/v2/members", get(members::search_members_page))
        .route("/v3/members", get(members::search_members_page_optimized))
        // Entity and bulk operations
        .route("/members", post(members::create_member))
        .route("/members/bulk-update", post(members::bulk_update_members))
        .route("/members/bulk-delete", post(members::bulk_delete_members))
        .route("/members/{member_id}", get(members::get_member))
        .route("/members/{member_id}/team", put(members::change_member_team))
        .route("/teams", post(teams::create_team))
        .route("/teams/{team_id}", get(teams::get_team))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
