use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::{ErrorResponse, FieldError};

/// API層のエラー型
///
/// アプリケーション層のエラーと入力検証エラーをHTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    Validation(garde::Report),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        ApiError::Validation(report)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // 422 Unprocessable Entity - 入力規則違反
            ApiError::Validation(report) => {
                let details = report
                    .iter()
                    .map(|(path, error)| FieldError {
                        field: path.to_string(),
                        message: error.message().to_string(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new("VALIDATION_FAILED", "Booking request is invalid")
                        .with_details(details),
                )
            }

            // 400 Bad Request - リクエストがない
            ApiError::Application(err @ BookingApplicationError::InvalidArgument { .. }) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_ARGUMENT", err.to_string()),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(BookingApplicationError::RoomDirectoryError(ref e)) => {
                tracing::error!("Room directory error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("ROOM_DIRECTORY_ERROR", "Failed to load study rooms"),
                )
            }
            ApiError::Application(BookingApplicationError::LedgerError(ref e)) => {
                tracing::error!("Booking ledger error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("BOOKING_LEDGER_ERROR", "Failed to access bookings"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
