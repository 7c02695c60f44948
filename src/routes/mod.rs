//! Ensamblado del router
//!
//! Las rutas bajo /api exigen API Key salvo los health checks; /api-docs
//! es público.

pub mod circulation_routes;
pub mod vehicle_routes;

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{docs, health};
use crate::middleware::{
    api_key_middleware, cors_middleware_with_origins, error_path_middleware, panic_response,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/v1/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/v1/circulation", circulation_routes::create_circulation_router())
        .layer(middleware::from_fn_with_state(
            state.api_keys.clone(),
            api_key_middleware,
        ));

    let public = Router::new()
        .route("/api/v1/vehicles/health", get(health::vehicles_health))
        .route("/api/v1/circulation/health", get(health::circulation_health))
        .route("/api/v1/info/health", get(health::info_health))
        .route("/api-docs", get(docs::openapi));

    Router::new()
        .merge(protected)
        .merge(public)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(middleware::from_fn_with_state(
            state.config.local_offset,
            error_path_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware_with_origins(&state.config.cors_origins))
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
