use axum::{extract::State, Json};

use models::service_context::{Model as ServiceContext, ServiceContextPatch};

use crate::errors::ApiError;
use crate::extract::RequiredJson;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/v1/service-context", tag = "service-context",
    responses(
        (status = 200, description = "Current context", body = crate::openapi::ServiceContextDoc),
        (status = 503, description = "Maintenance", body = crate::openapi::MessageResponse)
    )
)]
pub async fn retrieve(State(state): State<ServerState>) -> Result<Json<ServiceContext>, ApiError> {
    Ok(Json(state.service_context.get_status().await?))
}

#[utoipa::path(
    patch, path = "/v1/service-context", tag = "service-context",
    request_body = crate::openapi::UpdateServiceContextDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceContextDoc),
        (status = 400, description = "No data provided", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    RequiredJson(patch): RequiredJson<ServiceContextPatch>,
) -> Result<Json<ServiceContext>, ApiError> {
    Ok(Json(state.service_context.update(patch).await?))
}

#[utoipa::path(
    get, path = "/v1/maintenance/activate", tag = "service-context",
    responses((status = 200, description = "Maintenance on", body = crate::openapi::ServiceContextDoc))
)]
pub async fn activate(State(state): State<ServerState>) -> Result<Json<ServiceContext>, ApiError> {
    Ok(Json(state.service_context.activate_maintenance_mode().await?))
}

#[utoipa::path(
    get, path = "/v1/maintenance/deactivate", tag = "service-context",
    responses((status = 200, description = "Maintenance off", body = crate::openapi::ServiceContextDoc))
)]
pub async fn deactivate(State(state): State<ServerState>) -> Result<Json<ServiceContext>, ApiError> {
    Ok(Json(state.service_context.deactivate_maintenance_mode().await?))
}
