//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool y aplica las migraciones embebidas.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear un pool de conexiones y dejar el esquema al día
pub async fn connect(database_url: &str) -> Result<PgPool> {
    info!("Conectando a la base de datos: {}", mask_database_url(database_url));

    let pool = DatabaseConfig::new(database_url)
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error ejecutando migraciones")?;
    info!("Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    match rest.rfind('@') {
        Some(at_pos) => format!("{}***:***@{}", &url[..scheme_end + 3], &rest[at_pos + 1..]),
        None => url.to_string(),
    }
}
