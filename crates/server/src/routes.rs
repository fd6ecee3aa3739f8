use axum::{
    extract::State,
    http::Uri,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::middleware::maintenance_gate;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod service_context;
pub mod todo;

pub const OUTSIDE_APP: &str = "This url does not belong to the app.";

#[utoipa::path(
    get, path = "/status", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn status(State(state): State<ServerState>) -> Json<Health> {
    // health must answer even when the flag cannot be read
    let maintenance = state.service_context.is_maintenance().await.unwrap_or(false);
    Json(Health { status: "ok", maintenance })
}

async fn fallback(uri: Uri) -> ApiError {
    debug!(path = %uri.path(), "no route");
    ApiError::NotFound(OUTSIDE_APP.to_string())
}

fn api_routes() -> Router<ServerState> {
    let v1 = Router::new()
        .route("/todo", get(todo::list).post(todo::create).delete(todo::delete_all))
        .route("/todo/:id", get(todo::retrieve).patch(todo::update).delete(todo::delete))
        .route("/service-context", get(service_context::retrieve).patch(service_context::update))
        .route("/maintenance/activate", get(service_context::activate))
        .route("/maintenance/deactivate", get(service_context::deactivate));

    Router::new().nest("/v1", v1).route("/status", get(status))
}

/// Build the full application router: versioned API under the configured
/// prefix, Swagger UI, maintenance gate, CORS and access logging.
pub fn build_router(state: ServerState) -> Router {
    let prefix = state.config.prefix.clone();
    let api = if prefix.is_empty() { api_routes() } else { Router::new().nest(&prefix, api_routes()) };

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), maintenance_gate))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

