//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación por API Key, CORS
//! y el que completa los sobres de error.

pub mod auth;
pub mod cors;
pub mod error_path;

pub use auth::{api_key_middleware, ApiKeySet};
pub use cors::cors_middleware_with_origins;
pub use error_path::{error_path_middleware, panic_response};
