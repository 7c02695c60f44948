//! Hoy No Circula
//!
//! Servicio REST que mantiene un registro de vehículos y evalúa la regla
//! semanal de restricción vehicular por último dígito de placa.

pub mod api;
pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
