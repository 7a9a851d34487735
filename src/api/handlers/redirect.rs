//! Handler for tracked link resolution.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::state::AppState;
use crate::utils::link_id::validate_link_id;

/// Resolves a tracking id and redirects to the original URL.
///
/// # Endpoint
///
/// `GET /r/{id}`
///
/// # Request Flow
///
/// 1. Reject malformed ids before any store access
/// 2. Atomically increment the click counter and fetch the link
/// 3. Return `302 Found` with `Location` set to the stored URL
///
/// Lookup and increment are one store operation, so concurrent clicks on the
/// same id are all counted.
///
/// # Errors
///
/// - `400 Bad Request` (plain body) for malformed ids
/// - `404 Not Found` (plain body) for unknown ids, never a redirect
/// - `500` JSON error envelope when the store is unreachable
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    if validate_link_id(&id).is_err() {
        return (StatusCode::BAD_REQUEST, "Invalid tracking id").into_response();
    }

    match state.links.record_click(&id).await {
        Ok(Some(link)) => {
            debug!(id, clicks = link.clicks, "click recorded");
            metrics::counter!("relay_clicks_total").increment(1);

            // axum has no 302 helper (`Redirect::temporary` is 307), so the
            // response is assembled by hand.
            (StatusCode::FOUND, [(header::LOCATION, link.url)]).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Tracking link not found").into_response(),
        Err(e) => {
            error!(id, error = %e, "failed to resolve tracking link");
            e.into_response()
        }
    }
}

/// Rejects redirect requests that carry no tracking id.
///
/// # Endpoint
///
/// `GET /r`
///
/// Routed explicitly because the path without an id never matches the
/// parameterized route.
pub async fn missing_id_handler() -> Response {
    (StatusCode::BAD_REQUEST, "Missing tracking id").into_response()
}
