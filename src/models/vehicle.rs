//! Modelo de Vehicle
//!
//! Mapea la tabla `vehicles`. Placa y chasis se guardan en mayúsculas y
//! son únicos; las marcas de tiempo son hora local.

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Vehicle persistido
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub plate: String,
    pub color: String,
    pub model: String,
    pub chassis: String,
    pub brand: Option<String>,
    pub year: Option<i32>,
    #[sqlx(rename = "type")]
    pub vehicle_type: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Borrador de un vehículo antes de persistirlo (sin id ni marcas de tiempo)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub plate: String,
    pub color: String,
    pub model: String,
    pub chassis: String,
    pub brand: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: Option<String>,
}

impl NewVehicle {
    /// Materializar el borrador con el id y la hora asignados por el almacén
    pub fn into_vehicle(self, id: i64, now: NaiveDateTime) -> Vehicle {
        Vehicle {
            id,
            plate: self.plate,
            color: self.color,
            model: self.model,
            chassis: self.chassis,
            brand: self.brand,
            year: self.year,
            vehicle_type: self.vehicle_type,
            created_at: now,
            updated_at: now,
        }
    }
}
