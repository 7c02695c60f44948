use axum::{
    routing::{get, post},
    Router,
};

use crate::api::vehicles::{get_vehicle_by_plate, list_vehicles, register_vehicle};
use crate::state::AppState;

/// Rutas protegidas de vehículos, montadas bajo /api/v1/vehicles
pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/register", post(register_vehicle))
        .route("/:plate", get(get_vehicle_by_plate))
}
