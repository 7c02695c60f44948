//! Modelos de datos
//!
//! Structs que representan las entidades persistidas.

pub mod vehicle;

pub use vehicle::{NewVehicle, Vehicle};
