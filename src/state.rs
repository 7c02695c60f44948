//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo se construye una vez al arrancar.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::middleware::ApiKeySet;
use crate::repositories::VehicleDirectory;
use crate::services::{CirculationService, VehicleService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub api_keys: ApiKeySet,
    pub vehicles: VehicleService,
    pub circulation: CirculationService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, directory: Arc<dyn VehicleDirectory>) -> Self {
        Self {
            api_keys: ApiKeySet::new(&config.api_keys),
            config: Arc::new(config),
            vehicles: VehicleService::new(directory.clone()),
            circulation: CirculationService::new(directory),
        }
    }
}
