use axum::{routing::post, Router};

use crate::api::circulation::check_circulation;
use crate::state::AppState;

/// Rutas protegidas de circulación, montadas bajo /api/v1/circulation
pub fn create_circulation_router() -> Router<AppState> {
    Router::new().route("/check", post(check_circulation))
}
