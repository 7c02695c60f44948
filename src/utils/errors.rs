//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el sobre
//! `{timestamp, status, code, message, path}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("La placa no contiene dígitos válidos")]
    InvalidPlateFormat,

    #[error("Vehículo no encontrado")]
    VehicleNotFound(String),

    /// Igual que `VehicleNotFound` pero expuesto como 404 (consulta directa por placa)
    #[error("Vehículo no encontrado")]
    NotFound(String),

    #[error("Ya existe un vehículo registrado con esta placa")]
    DuplicatePlate(String),

    #[error("Ya existe un vehículo registrado con este chasis")]
    DuplicateChassis(String),

    #[error("{0}")]
    Validation(String),

    #[error("{}", describe_validation_errors(.0))]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Recurso no encontrado")]
    RouteNotFound,

    #[error("Método no permitido")]
    MethodNotAllowed,

    #[error("La petición excedió el tiempo máximo de respuesta")]
    RequestTimeout,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Código estable, legible por máquinas
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidPlateFormat => "INVALID_PLATE",
            AppError::VehicleNotFound(_) | AppError::NotFound(_) => "VEHICLE_NOT_FOUND",
            AppError::DuplicatePlate(_) => "VEHICLE_EXISTS",
            AppError::DuplicateChassis(_) => "CHASSIS_EXISTS",
            AppError::Validation(_) | AppError::ValidationErrors(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::RouteNotFound => "NOT_FOUND",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::RequestTimeout => "REQUEST_TIMEOUT",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Mensaje expuesto al cliente; los errores internos nunca filtran detalles
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Error interno del servidor".to_string(),
            other => other.to_string(),
        }
    }

    /// Error equivalente a una respuesta sin cuerpo generada por el router
    /// (ruta inexistente, método no soportado) o por el timeout
    pub fn from_bare_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::NOT_FOUND => Some(AppError::RouteNotFound),
            StatusCode::METHOD_NOT_ALLOWED => Some(AppError::MethodNotAllowed),
            StatusCode::REQUEST_TIMEOUT => Some(AppError::RequestTimeout),
            _ => None,
        }
    }

    /// Convierte un vehículo inexistente en un 404 para la consulta directa
    pub fn into_not_found(self) -> Self {
        match self {
            AppError::VehicleNotFound(plate) => AppError::NotFound(plate),
            other => other,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Cuerpo de la petición inválido: {}", rejection.body_text()))
    }
}

/// Une los errores de campo como "campo: mensaje; campo: mensaje", ordenados por campo
fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Sobre de error de la API
///
/// `timestamp` y `path` se completan en `middleware::error_path`, que conoce
/// la URI de la petición y el desfase horario local.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, example = "2026-01-05T09:00:00")]
    pub timestamp: NaiveDateTime,
    #[schema(example = 400)]
    pub status: u16,
    #[schema(value_type = String, example = "VEHICLE_NOT_FOUND")]
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    /// Sobre para un error; `timestamp` y `path` quedan provisionales
    pub fn for_error(err: &AppError) -> Self {
        let status = err.status();
        Self {
            timestamp: Utc::now().naive_utc(),
            status: status.as_u16(),
            code: err.code(),
            message: err.public_message(),
            path: String::new(),
        }
    }
}

/// Fecha y hora local sin fracción de segundo (`yyyy-MM-dd'T'HH:mm:ss`)
pub fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Database(e) => error!("Error de base de datos: {}", e),
            AppError::Internal(msg) => error!("Error interno: {}", msg),
            AppError::Unauthorized(msg) => warn!("Acceso no autorizado: {}", msg),
            other => warn!("Error de negocio [{}]: {}", other.code(), other),
        }

        let body = ErrorResponse::for_error(&self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
