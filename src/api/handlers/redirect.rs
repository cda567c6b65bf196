//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// After the link resolves, a click event is handed to the click dispatcher.
/// Under the `block` policy the response waits for queue space; under `drop`
/// a full queue loses the click. Either way the visitor is redirected.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let link = state.link_service.get_by_short_code(&code).await?;

    let click_event = ClickEvent::new(
        link.id,
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        Some(client_ip(&headers, addr)),
    );

    // Failures are logged by the dispatcher; the redirect proceeds regardless.
    let _ = state.click_dispatcher.dispatch(click_event).await;

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]).into_response())
}
