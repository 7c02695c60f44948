//! Completa el sobre de error con la ruta y la hora local de la petición
//!
//! Las respuestas sin cuerpo que genera el propio router (método no
//! soportado) o el `TimeoutLayer` reciben aquí el mismo sobre que los
//! errores de los handlers.

use std::any::Any;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::FixedOffset;

use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::validation::local_now;

pub async fn error_path_middleware(
    State(offset): State<FixedOffset>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let existing = response.extensions().get::<ErrorResponse>().cloned();
    let Some(mut envelope) = existing.or_else(|| bare_envelope(&response)) else {
        return response;
    };
    envelope.path = path;
    envelope.timestamp = local_now(offset);

    match serde_json::to_vec(&envelope) {
        Ok(bytes) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            parts
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(_) => response,
    }
}

// Solo respuestas sin Content-Type: las de los handlers ya traen su cuerpo
fn bare_envelope(response: &Response) -> Option<ErrorResponse> {
    if response.headers().contains_key(header::CONTENT_TYPE) {
        return None;
    }
    AppError::from_bare_status(response.status()).map(|err| ErrorResponse::for_error(&err))
}

/// Respuesta 500 para `CatchPanicLayer`: el detalle del pánico solo se registra
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "sin mensaje".to_string()
    };

    AppError::Internal(format!("pánico en handler: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{body::to_bytes, http::StatusCode, middleware, routing::get, Router};
    use serde_json::Value;
    use tower::ServiceExt as _;
    use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

    async fn ok() -> &'static str {
        "ok"
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_millis(500)).await;
        "tarde"
    }

    async fn boom() -> &'static str {
        panic!("fallo inesperado")
    }

    // Mismo orden de capas que el router de la aplicación
    fn app() -> Router {
        Router::new()
            .route("/ok", get(ok))
            .route("/slow", get(slow))
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(Duration::from_millis(20)))
            .layer(middleware::from_fn_with_state(
                FixedOffset::west_opt(5 * 3600).unwrap(),
                error_path_middleware,
            ))
    }

    async fn call(method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn successful_responses_are_untouched() {
        let (status, body) = call("GET", "/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn timeout_gets_envelope() {
        let (status, body) = call("GET", "/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], 408);
        assert_eq!(body["code"], "REQUEST_TIMEOUT");
        assert_eq!(body["path"], "/slow");
    }

    #[tokio::test]
    async fn method_not_allowed_gets_envelope() {
        let (status, body) = call("POST", "/ok").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["path"], "/ok");
    }

    #[tokio::test]
    async fn panic_becomes_internal_error_without_details() {
        let (status, body) = call("GET", "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Error interno del servidor");
        assert_eq!(body["path"], "/boom");
    }
}
