use crate::application::booking::{
    ServiceDependencies, book_room as execute_book_room, list_bookings as execute_list_bookings,
    list_rooms as execute_list_rooms,
};
use crate::domain::BookingCode;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use garde::Validate;
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookingRequestContext, BookingResponse, BookingResultResponse, CreateBookingRequest,
        ListBookingsQuery, RoomResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /bookings - 自習室を予約
///
/// 本文がJSONの`null`の場合はリクエストなしとして扱い、400を返す。
/// 入力規則（必須項目、メール形式、未来の日付）に違反した場合は
/// 予約処理を呼ばずに422を返す。
///
/// - 成功: 201 Created
/// - 空き部屋なし: 409 Conflict（本文は成功時と同じ形）
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Option<CreateBookingRequest>>,
) -> Result<(StatusCode, Json<BookingResultResponse>), ApiError> {
    let req = req.map(CreateBookingRequest::trimmed);

    if let Some(req) = &req {
        let context = BookingRequestContext::new(Utc::now().date_naive());
        if let Err(report) = req.validate_with(&context) {
            tracing::debug!(%report, "booking request rejected");
            return Err(ApiError::from(report));
        }
    }

    let request = req.map(CreateBookingRequest::into_domain);
    let result = execute_book_room(&state.service_deps, request).await?;

    let status = match result.code {
        BookingCode::Success => StatusCode::CREATED,
        BookingCode::NoRoomAvailable => StatusCode::CONFLICT,
    };

    Ok((status, Json(BookingResultResponse::from(result))))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings - 予約一覧取得
///
/// クエリパラメータ:
/// - date: 日付でフィルタリング（YYYY-MM-DD）（オプション）
///
/// 日付が指定されない場合は、全予約を返す。
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = execute_list_bookings(&state.service_deps, query.date).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// GET /rooms - 部屋一覧取得
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = execute_list_rooms(&state.service_deps).await?;

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}
