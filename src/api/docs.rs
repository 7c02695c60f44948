//! Documento OpenAPI (GET /api-docs)
//!
//! Se genera con utoipa a partir de los handlers anotados y de los DTOs.

use axum::response::Json;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::{circulation, health, vehicles};
use crate::dto::{CirculationCheckRequest, CirculationCheckResponse, VehicleRequest, VehicleResponse};
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hoy No Circula API",
        description = "REST API para validación de circulación de vehículos según la norma 'Hoy No Circula'",
        license(name = "Apache 2.0", url = "https://www.apache.org/licenses/LICENSE-2.0.html")
    ),
    paths(
        vehicles::register_vehicle,
        vehicles::get_vehicle_by_plate,
        vehicles::list_vehicles,
        circulation::check_circulation,
        health::vehicles_health,
        health::circulation_health,
        health::info_health,
    ),
    components(schemas(
        VehicleRequest,
        VehicleResponse,
        CirculationCheckRequest,
        CirculationCheckResponse,
        ErrorResponse,
    )),
    modifiers(&ApiKeyAddon),
    tags(
        (name = "Vehículos", description = "Registro y consulta de vehículos"),
        (name = "Circulación", description = "Validación de la restricción vehicular"),
        (name = "Health", description = "Health checks sin autenticación")
    )
)]
pub struct ApiDoc;

/// Esquema de seguridad `ApiKeyAuth` (header X-API-Key)
struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "ApiKeyAuth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
