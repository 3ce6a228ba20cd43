use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::domain::validation::{DATE_NOT_IN_FUTURE_MESSAGE, is_date_in_future};
use crate::domain::{Booking, BookingCode, BookingRequest, BookingResult, Room};

/// 予約失敗時にクライアントへ表示するメッセージ
pub const NO_ROOM_AVAILABLE_MESSAGE: &str = "No Study Room available for selected date";

/// 予約成功時のメッセージ
pub const BOOKING_CONFIRMED_MESSAGE: &str = "Booking confirmed";

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// 日付でフィルタリング（省略時は全件）
    pub date: Option<NaiveDate>,
}

/// 入力検証のコンテキスト
///
/// 日付の規則は呼び出し側が渡す`today`を基準にする。
pub struct BookingRequestContext {
    pub today: NaiveDate,
}

impl BookingRequestContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// 予約作成リクエスト（POST /bookings）
///
/// 検証は`trimmed`の後に行う。空白のみの名前は空として扱われる。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[garde(context(BookingRequestContext))]
pub struct CreateBookingRequest {
    #[garde(length(min = 1))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(email)]
    pub email: String,
    #[garde(custom(date_in_future))]
    pub date: NaiveDate,
}

impl CreateBookingRequest {
    /// 文字列項目の前後の空白を取り除く
    pub fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date: self.date,
        }
    }

    pub fn into_domain(self) -> BookingRequest {
        BookingRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date: self.date,
        }
    }
}

fn date_in_future(value: &NaiveDate, context: &BookingRequestContext) -> garde::Result {
    if is_date_in_future(*value, context.today) {
        Ok(())
    } else {
        Err(garde::Error::new(DATE_NOT_IN_FUTURE_MESSAGE))
    }
}

/// 予約処理結果のレスポンス（POST /bookings）
///
/// 成功・空きなしのどちらでも同じ形で返す。
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResultResponse {
    pub code: BookingCode,
    pub message: String,
    pub booking_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
}

impl From<BookingResult> for BookingResultResponse {
    fn from(result: BookingResult) -> Self {
        let message = match result.code {
            BookingCode::Success => BOOKING_CONFIRMED_MESSAGE,
            BookingCode::NoRoomAvailable => NO_ROOM_AVAILABLE_MESSAGE,
        };

        Self {
            code: result.code,
            message: message.to_string(),
            booking_id: result.booking_id.map(|id| id.value()),
            first_name: result.first_name,
            last_name: result.last_name,
            email: result.email,
            date: result.date,
        }
    }
}

/// 予約レスポンス（GET /bookings）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub study_room_id: i32,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.booking_id.value(),
            first_name: booking.first_name,
            last_name: booking.last_name,
            email: booking.email,
            date: booking.date,
            study_room_id: booking.study_room_id.value(),
        }
    }
}

/// 部屋レスポンス（GET /rooms）
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: i32,
    pub room_name: String,
    pub room_number: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.value(),
            room_name: room.room_name,
            room_number: room.room_number,
        }
    }
}

/// 入力規則違反の詳細
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = details;
        self
    }
}
