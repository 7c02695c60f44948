//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Se lee una sola vez al
//! arrancar y se inyecta en el estado de la aplicación.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::FixedOffset;

const DEFAULT_API_KEYS: &str =
    "dev-api-key-12345,prod-api-key-secure-key,mobile-app-key-2024,frontend-web-key-2024";

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://localhost:4200,http://localhost:5173";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Sin URL se usa el directorio en memoria (modo desarrollo)
    pub database_url: Option<String>,
    pub api_keys: Vec<String>,
    pub cors_origins: Vec<String>,
    /// Desfase usado para la hora local (America/Guayaquil no tiene horario de verano)
    pub local_offset: FixedOffset,
    pub request_timeout: Duration,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Construir la configuración a partir de una fuente de claves arbitraria
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => 8080,
        };

        let offset_hours = match var("LOCAL_UTC_OFFSET_HOURS") {
            Some(raw) => raw
                .parse::<i32>()
                .with_context(|| format!("LOCAL_UTC_OFFSET_HOURS must be an integer, got '{}'", raw))?,
            None => -5,
        };
        let local_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| anyhow!("LOCAL_UTC_OFFSET_HOURS out of range: {}", offset_hours))?;

        let request_timeout = match var("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a valid number, got '{}'", raw))?,
            ),
            None => Duration::from_secs(30),
        };

        let api_keys = split_list(&var("API_KEYS").unwrap_or_else(|| DEFAULT_API_KEYS.to_string()));
        if api_keys.is_empty() {
            bail!("API_KEYS must contain at least one key");
        }

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: var("DATABASE_URL"),
            api_keys,
            cors_origins: split_list(
                &var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            local_offset,
            request_timeout,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
