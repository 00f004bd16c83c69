use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not enough items available")]
    InsufficientStock { available: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MenuItemNotFound | DomainError::OrderNotFound => {
                AppError::NotFound(e.to_string())
            }
            DomainError::InsufficientStock { available } => AppError::InsufficientStock { available },
            DomainError::DuplicateMenuItem(_) | DomainError::InvalidInput(_) => {
                AppError::BadRequest(e.to_string())
            }
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::InsufficientStock { available } => json!({
                "message": self.to_string(),
                "available": available
            }),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                json!({ "message": "Internal server error" })
            }
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Turns malformed JSON bodies into a `400 {message}` response.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Turns unparseable path ids into a `400 {message}` response.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;
    use serde_json::Value;

    async fn body_json(err: AppError) -> Value {
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_stock_returns_400() {
        let resp = AppError::InsufficientStock { available: 3 }.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn insufficient_stock_body_carries_available() {
        let body = body_json(AppError::InsufficientStock { available: 3 }).await;
        assert_eq!(body["message"], "Not enough items available");
        assert_eq!(body["available"], 3);
    }

    #[actix_web::test]
    async fn internal_error_body_hides_detail() {
        let body = body_json(AppError::Internal("connection refused".to_string())).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found_with_message() {
        let app_err: AppError = DomainError::MenuItemNotFound.into();
        assert!(matches!(&app_err, AppError::NotFound(msg) if msg == "Menu item not found"));

        let app_err: AppError = DomainError::OrderNotFound.into();
        assert!(matches!(&app_err, AppError::NotFound(msg) if msg == "Order not found"));
    }

    #[test]
    fn domain_insufficient_stock_keeps_available() {
        let app_err: AppError = DomainError::InsufficientStock { available: 7 }.into();
        assert!(matches!(app_err, AppError::InsufficientStock { available: 7 }));
    }

    #[test]
    fn domain_invalid_input_maps_to_bad_request() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::BadRequest(_)));

        let app_err: AppError = DomainError::DuplicateMenuItem(1).into();
        assert!(matches!(&app_err, AppError::BadRequest(msg) if msg.contains("already exists")));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
