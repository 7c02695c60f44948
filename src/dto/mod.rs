pub mod circulation_dto;
pub mod vehicle_dto;

pub use circulation_dto::{CirculationCheckRequest, CirculationCheckResponse};
pub use vehicle_dto::{VehicleRequest, VehicleResponse};
