//! Health checks, sin autenticación

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::{state::AppState, utils::validation::local_now};

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/health",
    tag = "Health",
    responses((status = 200, description = "Servicio de vehículos activo", body = String))
)]
pub async fn vehicles_health() -> &'static str {
    "Vehicle Service is running"
}

#[utoipa::path(
    get,
    path = "/api/v1/circulation/health",
    tag = "Health",
    responses((status = 200, description = "Servicio de circulación activo", body = String))
)]
pub async fn circulation_health() -> &'static str {
    "Circulation Service is running"
}

#[utoipa::path(
    get,
    path = "/api/v1/info/health",
    tag = "Health",
    responses((status = 200, description = "Estado, versión y hora local del servicio"))
)]
pub async fn info_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "service": "hoy-no-circula",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": local_now(state.config.local_offset)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
    }))
}
