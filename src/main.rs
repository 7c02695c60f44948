use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hoy_no_circula::config::EnvironmentConfig;
use hoy_no_circula::database;
use hoy_no_circula::repositories::{InMemoryVehicleRepository, PgVehicleRepository, VehicleDirectory};
use hoy_no_circula::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hoy_no_circula=debug")),
        )
        .init();

    info!("🚗 Hoy No Circula - API de circulación vehicular");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Directorio de vehículos: PostgreSQL si hay DATABASE_URL, memoria si no
    let directory: Arc<dyn VehicleDirectory> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = database::connect(url).await?;
            info!("✅ Base de datos conectada");
            Arc::new(PgVehicleRepository::new(pool, config.local_offset))
        }
        None => {
            if config.is_production() {
                anyhow::bail!("DATABASE_URL must be set in production");
            }
            warn!("DATABASE_URL no definida, usando directorio en memoria (los datos no persisten)");
            Arc::new(InMemoryVehicleRepository::new(config.local_offset))
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    info!("🔑 {} API Keys configuradas", config.api_keys.len());
    let app = create_router(AppState::new(config, directory));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   POST /api/v1/vehicles/register - Registrar vehículo");
    info!("   GET  /api/v1/vehicles/:plate - Obtener vehículo");
    info!("   GET  /api/v1/vehicles - Listar vehículos");
    info!("   POST /api/v1/circulation/check - Validar circulación");
    info!("   GET  /api-docs - Documento OpenAPI");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
