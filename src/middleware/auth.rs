//! Middleware de autenticación por API Key
//!
//! Las claves aceptadas se fijan al arrancar a partir de la configuración y
//! se comparten de forma inmutable; no hay expiración ni rotación.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::utils::errors::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Conjunto inmutable de claves válidas
#[derive(Debug, Clone)]
pub struct ApiKeySet {
    keys: Arc<HashSet<String>>,
}

impl ApiKeySet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys: Arc::new(keys) }
    }

    pub fn is_valid(&self, api_key: &str) -> bool {
        self.keys.contains(api_key.trim())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Verificar la clave del header `X-API-Key`
pub fn verify_api_key(keys: &ApiKeySet, header: Option<&str>) -> Result<(), AppError> {
    let api_key = header.map(str::trim).filter(|k| !k.is_empty()).ok_or_else(|| {
        AppError::Unauthorized("API Key no proporcionada en el header X-API-Key".to_string())
    })?;

    if !keys.is_valid(api_key) {
        return Err(AppError::Unauthorized("API Key inválida o expirada".to_string()));
    }
    Ok(())
}

/// Middleware que exige una API Key válida antes de llegar a los handlers
pub async fn api_key_middleware(
    State(keys): State<ApiKeySet>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    verify_api_key(&keys, header)?;
    debug!("API Key aceptada para {}", request.uri().path());

    Ok(next.run(request).await)
}
