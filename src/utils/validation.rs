//! Utilidades de validación
//!
//! Interpretación de la fecha y hora de consulta y la política de fechas.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::utils::errors::{AppError, AppResult};

/// Formatos locales aceptados (sin zona horaria)
const LOCAL_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const INVALID_FORMAT_MESSAGE: &str =
    "Formato de fecha inválido. Use: yyyy-MM-dd'T'HH:mm:ss o yyyy-MM-dd HH:mm:ss";

/// Convertir la fecha y hora recibida a hora local.
///
/// Los valores con zona (RFC 3339) se llevan al desfase local configurado.
pub fn parse_check_datetime(value: &str, offset: FixedOffset) -> AppResult<NaiveDateTime> {
    let value = value.trim();

    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&offset).naive_local())
        .map_err(|_| AppError::Validation(INVALID_FORMAT_MESSAGE.to_string()))
}

/// Hora local actual para el desfase dado
pub fn local_now(offset: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&offset).naive_local()
}

/// La consulta debe ser en el pasado o el presente
pub fn ensure_not_future(check: NaiveDateTime, now: NaiveDateTime) -> AppResult<()> {
    if check > now {
        return Err(AppError::Validation(
            "La fecha y hora no puede ser futura".to_string(),
        ));
    }
    Ok(())
}
