//! Servicio de vehículos: registro, consulta por placa y listado

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::dto::{VehicleRequest, VehicleResponse};
use crate::repositories::VehicleDirectory;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct VehicleService {
    directory: Arc<dyn VehicleDirectory>,
}

impl VehicleService {
    pub fn new(directory: Arc<dyn VehicleDirectory>) -> Self {
        Self { directory }
    }

    /// Registrar un vehículo nuevo.
    ///
    /// Las búsquedas previas de placa y chasis solo adelantan el error más
    /// común: con escritores concurrentes dos peticiones pueden pasar ambas
    /// comprobaciones, y es `create` quien decide con la restricción de
    /// unicidad del almacén.
    pub async fn register_vehicle(&self, request: VehicleRequest) -> AppResult<VehicleResponse> {
        let request = request.normalized();
        request.validate()?;

        info!("Registrando vehículo con placa: {}", request.plate);

        if self.directory.find_by_plate(&request.plate).await?.is_some() {
            return Err(AppError::DuplicatePlate(request.plate));
        }
        if self.directory.find_by_chassis(&request.chassis).await?.is_some() {
            return Err(AppError::DuplicateChassis(request.chassis));
        }

        let vehicle = self.directory.create(request.into_draft()).await?;
        info!("Vehículo registrado exitosamente: {}", vehicle.id);

        Ok(vehicle.into())
    }

    pub async fn get_vehicle_by_plate(&self, plate: &str) -> AppResult<VehicleResponse> {
        let plate = plate.trim().to_uppercase();
        debug!("Obteniendo vehículo con placa: {}", plate);

        let vehicle = self.directory.find_by_plate(&plate).await?;
        vehicle
            .map(VehicleResponse::from)
            .ok_or(AppError::VehicleNotFound(plate))
    }

    pub async fn get_all_vehicles(&self) -> AppResult<Vec<VehicleResponse>> {
        debug!("Obteniendo todos los vehículos");

        let vehicles = self.directory.list_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
