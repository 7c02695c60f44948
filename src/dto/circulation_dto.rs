use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::utils::errors::serialize_timestamp;

// Request para consultar la circulación; la fecha llega como texto y se
// interpreta en utils::validation
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CirculationCheckRequest {
    #[serde(default)]
    #[schema(example = "PBX-1234")]
    #[validate(length(min = 1, message = "La placa es obligatoria"))]
    pub plate: String,

    /// Hora local: yyyy-MM-dd'T'HH:mm:ss, yyyy-MM-dd HH:mm:ss o RFC 3339
    #[serde(default)]
    #[schema(example = "2026-01-05T09:00:00")]
    #[validate(length(min = 1, message = "La fecha y hora es obligatoria"))]
    pub check_date_time: String,
}

impl CirculationCheckRequest {
    pub fn normalized(self) -> Self {
        Self {
            plate: self.plate.trim().to_uppercase(),
            check_date_time: self.check_date_time.trim().to_string(),
        }
    }
}

// Response de la consulta de circulación
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CirculationCheckResponse {
    pub vehicle: VehicleResponse,
    pub can_circulate: bool,
    pub message: String,
    pub last_digit_plate: String,
    pub day_of_week: String,
    #[schema(example = "MONDAY")]
    pub restriction_day: String,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, example = "2026-01-05T09:00:00")]
    pub check_date_time: NaiveDateTime,
}
