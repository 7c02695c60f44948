//! Handlers HTTP de la API

pub mod circulation;
pub mod docs;
pub mod health;
pub mod vehicles;
