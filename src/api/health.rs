//! Health, readiness and liveness probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            Self::Healthy => StatusCode::OK,
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Result of probing one dependency
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// GET /health - process is up
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
        checks: None,
        latency_ms: None,
    })
}

/// GET /ready - the member store answers a count
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store = probe_member_store(&state).await;
    let status = store.status;

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: Some(vec![store]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    (status.status_code(), Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn probe_member_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let result = state.member_service.count_members().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheck {
            name: "member_store",
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => HealthCheck {
            name: "member_store",
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HealthStatus::Healthy.status_code(), StatusCode::OK);
        assert_eq!(
            HealthStatus::Unhealthy.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_unhealthy_check_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Unhealthy,
            version: "0.1.0",
            checks: Some(vec![HealthCheck {
                name: "member_store",
                status: HealthStatus::Unhealthy,
                message: Some("Storage error: connection refused".to_string()),
                latency_ms: 3,
            }]),
            latency_ms: Some(4),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["checks"][0]["name"], "member_store");
        assert_eq!(
            json["checks"][0]["message"],
            "Storage error: connection refused"
        );
    }

    #[test]
    fn test_liveness_response_omits_checks() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0",
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("checks"));
        assert!(!json.contains("latency_ms"));
    }
}
