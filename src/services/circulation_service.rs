//! Servicio de circulación
//!
//! Orquesta la extracción del último dígito, la búsqueda del vehículo y la
//! evaluación de la regla. Solo lee del directorio.

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::info;

use crate::dto::{CirculationCheckResponse, VehicleResponse};
use crate::repositories::VehicleDirectory;
use crate::services::restriction::{self, weekday_name};
use crate::utils::errors::{AppError, AppResult};

/// Último dígito ASCII de la placa, leyendo de derecha a izquierda
pub fn last_digit(plate: &str) -> AppResult<char> {
    plate
        .chars()
        .rev()
        .find(char::is_ascii_digit)
        .ok_or(AppError::InvalidPlateFormat)
}

#[derive(Clone)]
pub struct CirculationService {
    directory: Arc<dyn VehicleDirectory>,
}

impl CirculationService {
    pub fn new(directory: Arc<dyn VehicleDirectory>) -> Self {
        Self { directory }
    }

    pub async fn check_circulation(
        &self,
        plate: &str,
        check_date_time: NaiveDateTime,
    ) -> AppResult<CirculationCheckResponse> {
        let plate = plate.trim().to_uppercase();
        info!("Validando circulación para placa: {} en fecha: {}", plate, check_date_time);

        let digit = last_digit(&plate)?;

        let vehicle = self
            .directory
            .find_by_plate(&plate)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(plate.clone()))?;

        let day = check_date_time.weekday();
        let decision = restriction::evaluate(digit, day, check_date_time.hour());

        Ok(CirculationCheckResponse {
            vehicle: VehicleResponse::from(vehicle),
            can_circulate: decision.can_circulate,
            restriction_day: decision.restriction_day_name().to_string(),
            message: decision.message,
            last_digit_plate: digit.to_string(),
            day_of_week: weekday_name(day).to_string(),
            check_date_time,
        })
    }
}
