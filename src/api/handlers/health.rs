//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Tracking store round-trip
/// 2. **Queue**: Redis PING on the job queue connection
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Tracking store reachable" },
///     "queue": { "status": "ok", "message": "Queue backend reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let queue_check = check_queue(&state).await;

    let all_healthy = db_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks tracking store connectivity with a round-trip query.
async fn check_database(state: &AppState) -> CheckStatus {
    if state.links.health_check().await {
        CheckStatus::ok("Tracking store reachable")
    } else {
        CheckStatus::error("Tracking store check failed")
    }
}

/// Checks queue backend connectivity via PING.
async fn check_queue(state: &AppState) -> CheckStatus {
    if state.queue.health_check().await {
        CheckStatus::ok("Queue backend reachable")
    } else {
        CheckStatus::error("Queue backend check failed")
    }
}
