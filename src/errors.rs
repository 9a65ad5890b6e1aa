//! errors.rs
//!
//! Единый тип ошибок API. Каждый вариант знает свой HTTP-статус, тело
//! всегда вида {"detail": "..."}. Внутренние ошибки наружу не
//! раскрываются: клиент видит общий текст, детали уходят в лог.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::ScreenError;
use crate::services::ledger::BookingError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Not enough permissions")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Screen(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Booking(BookingError::ShowtimeNotFound) => StatusCode::NOT_FOUND,
            ApiError::Booking(BookingError::SeatsUnavailable { .. }) => StatusCode::CONFLICT,
            ApiError::Booking(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            error!(error = %source, "Internal error while handling request");
        }
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_errors_map_to_expected_statuses() {
        assert_eq!(
            ApiError::from(BookingError::ShowtimeNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(BookingError::SeatsUnavailable {
                seats: vec!["C4".to_string()]
            })
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(BookingError::InvalidSeat {
                seats: vec!["Z9".to_string()]
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = ApiError::from(anyhow::anyhow!("db password is hunter2"));
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
