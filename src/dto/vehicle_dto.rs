use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewVehicle, Vehicle};

// Request para registrar un vehículo
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct VehicleRequest {
    #[serde(default)]
    #[schema(example = "PBX-1234", max_length = 20)]
    #[validate(length(min = 1, max = 20, message = "La placa es obligatoria (máximo 20 caracteres)"))]
    pub plate: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "El color es obligatorio (máximo 50 caracteres)"))]
    pub color: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "El modelo es obligatorio (máximo 50 caracteres)"))]
    pub model: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "El chasis es obligatorio (máximo 50 caracteres)"))]
    pub chassis: String,

    #[validate(length(max = 50, message = "La marca admite máximo 50 caracteres"))]
    pub brand: Option<String>,

    #[schema(minimum = 1900, maximum = 2100)]
    #[validate(range(min = 1900, max = 2100, message = "El año debe estar entre 1900 y 2100"))]
    pub year: Option<i32>,

    #[serde(rename = "type")]
    #[validate(length(max = 50, message = "El tipo admite máximo 50 caracteres"))]
    pub vehicle_type: Option<String>,
}

impl VehicleRequest {
    /// Recortar espacios y pasar placa/chasis a mayúsculas.
    ///
    /// Se aplica antes de validar, así un campo con solo espacios queda vacío.
    pub fn normalized(self) -> Self {
        Self {
            plate: self.plate.trim().to_uppercase(),
            color: self.color.trim().to_string(),
            model: self.model.trim().to_string(),
            chassis: self.chassis.trim().to_uppercase(),
            brand: trim_optional(self.brand),
            year: self.year,
            vehicle_type: trim_optional(self.vehicle_type),
        }
    }

    pub fn into_draft(self) -> NewVehicle {
        NewVehicle {
            plate: self.plate,
            color: self.color,
            model: self.model,
            chassis: self.chassis,
            brand: self.brand,
            year: self.year,
            vehicle_type: self.vehicle_type,
        }
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Response de vehículo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i64,
    pub plate: String,
    pub color: String,
    pub model: String,
    pub chassis: String,
    pub brand: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            color: vehicle.color,
            model: vehicle.model,
            chassis: vehicle.chassis,
            brand: vehicle.brand,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_uppercases_identifiers_and_trims() {
        let request = VehicleRequest {
            plate: " abc-123 ".into(),
            color: " rojo ".into(),
            model: "sedan".into(),
            chassis: "ch123456".into(),
            brand: Some("   ".into()),
            year: Some(2020),
            vehicle_type: Some(" suv ".into()),
        }
        .normalized();

        assert_eq!(request.plate, "ABC-123");
        assert_eq!(request.color, "rojo");
        assert_eq!(request.chassis, "CH123456");
        assert_eq!(request.brand, None);
        assert_eq!(request.vehicle_type.as_deref(), Some("suv"));
    }

    #[test]
    fn blank_required_field_fails_after_normalization() {
        let request = VehicleRequest {
            plate: "ABC123".into(),
            color: "   ".into(),
            model: "SEDAN".into(),
            chassis: "CH1".into(),
            ..Default::default()
        }
        .normalized();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("color"));
    }

    #[test]
    fn year_out_of_range_is_rejected() {
        let request = VehicleRequest {
            plate: "ABC123".into(),
            color: "ROJO".into(),
            model: "SEDAN".into(),
            chassis: "CH1".into(),
            year: Some(1800),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn type_field_uses_wire_name() {
        let request: VehicleRequest = serde_json::from_str(
            r#"{"plate":"ABC123","color":"ROJO","model":"SEDAN","chassis":"CH1","type":"SUV"}"#,
        )
        .unwrap();
        assert_eq!(request.vehicle_type.as_deref(), Some("SUV"));
    }
}
