use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

use common::types::Message;

use crate::state::ServerState;

pub const MAINTENANCE_MESSAGE: &str = "Service is currently enduring maintenance";

/// Paths that stay reachable while maintenance is on, so the flag can be cleared.
pub fn is_exempt(path: &str) -> bool {
    path.contains("maintenance") || path.contains("status")
}

/// Answer 503 for every non-exempt request while maintenance mode is active.
pub async fn maintenance_gate(State(state): State<ServerState>, req: Request, next: Next) -> Response {
    if is_exempt(req.uri().path()) {
        return next.run(req).await;
    }
    match state.service_context.is_maintenance().await {
        Ok(true) => {
            debug!(path = %req.uri().path(), "rejected during maintenance");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Message::new(MAINTENANCE_MESSAGE))).into_response()
        }
        Ok(false) => next.run(req).await,
        Err(e) => {
            warn!(error = %e, "could not read maintenance flag, letting request through");
            next.run(req).await
        }
    }
}
