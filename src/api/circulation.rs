//! Handler de la consulta "Hoy No Circula"

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{CirculationCheckRequest, CirculationCheckResponse},
    state::AppState,
    utils::{
        errors::{AppResult, ErrorResponse},
        validation::{ensure_not_future, local_now, parse_check_datetime},
    },
};

/// POST /api/v1/circulation/check
///
/// La fecha se interpreta como hora local y no puede estar en el futuro.
#[utoipa::path(
    post,
    path = "/api/v1/circulation/check",
    tag = "Circulación",
    request_body = CirculationCheckRequest,
    responses(
        (status = 200, description = "Validación completada", body = CirculationCheckResponse),
        (status = 400, description = "Error de validación o vehículo no existe", body = ErrorResponse),
        (status = 401, description = "API Key ausente o inválida", body = ErrorResponse)
    ),
    security(("ApiKeyAuth" = []))
)]
pub async fn check_circulation(
    State(state): State<AppState>,
    payload: Result<Json<CirculationCheckRequest>, JsonRejection>,
) -> AppResult<Json<CirculationCheckResponse>> {
    let Json(request) = payload?;
    let request = request.normalized();
    request.validate()?;

    info!(
        "POST /api/v1/circulation/check - placa: {} fecha: {}",
        request.plate, request.check_date_time
    );

    let offset = state.config.local_offset;
    let check_date_time = parse_check_datetime(&request.check_date_time, offset)?;
    ensure_not_future(check_date_time, local_now(offset))?;

    let response = state
        .circulation
        .check_circulation(&request.plate, check_date_time)
        .await?;
    Ok(Json(response))
}
