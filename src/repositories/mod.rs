pub mod vehicle_repository;

pub use vehicle_repository::{InMemoryVehicleRepository, PgVehicleRepository, VehicleDirectory};
