//! Handlers de Vehicles
//!
//! Registro, consulta por placa y listado.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    dto::{VehicleRequest, VehicleResponse},
    state::AppState,
    utils::errors::{AppError, AppResult, ErrorResponse},
};

/// POST /api/v1/vehicles/register
#[utoipa::path(
    post,
    path = "/api/v1/vehicles/register",
    tag = "Vehículos",
    request_body = VehicleRequest,
    responses(
        (status = 201, description = "Vehículo registrado exitosamente", body = VehicleResponse),
        (status = 400, description = "Error de validación o vehículo ya existe", body = ErrorResponse),
        (status = 401, description = "API Key ausente o inválida", body = ErrorResponse)
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn register_vehicle(
    State(state): State<AppState>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<VehicleResponse>)> {
    let Json(request) = payload?;
    info!("POST /api/v1/vehicles/register - placa: {}", request.plate);

    let vehicle = state.vehicles.register_vehicle(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// GET /api/v1/vehicles/:plate
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{plate}",
    tag = "Vehículos",
    params(("plate" = String, Path, description = "Placa del vehículo, sin distinguir mayúsculas")),
    responses(
        (status = 200, description = "Vehículo encontrado", body = VehicleResponse),
        (status = 404, description = "Vehículo no encontrado", body = ErrorResponse),
        (status = 401, description = "API Key ausente o inválida", body = ErrorResponse)
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn get_vehicle_by_plate(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> AppResult<Json<VehicleResponse>> {
    debug!("GET /api/v1/vehicles/{} - Obteniendo vehículo", plate);

    let vehicle = state
        .vehicles
        .get_vehicle_by_plate(&plate)
        .await
        .map_err(AppError::into_not_found)?;
    Ok(Json(vehicle))
}

/// GET /api/v1/vehicles
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehículos",
    responses(
        (status = 200, description = "Lista de vehículos ordenada por id", body = [VehicleResponse]),
        (status = 401, description = "API Key ausente o inválida", body = ErrorResponse)
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<VehicleResponse>>> {
    debug!("GET /api/v1/vehicles - Obteniendo todos los vehículos");

    let vehicles = state.vehicles.get_all_vehicles().await?;
    Ok(Json(vehicles))
}
