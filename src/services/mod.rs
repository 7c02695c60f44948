//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: la regla
//! de restricción (pura) y los servicios que la combinan con el
//! directorio de vehículos.

pub mod circulation_service;
pub mod restriction;
pub mod vehicle_service;

pub use circulation_service::CirculationService;
pub use vehicle_service::VehicleService;
