use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{BookingId, Room, RoomId};

/// 予約リクエスト - 利用者が送信する入力値
///
/// 永続化はされない。日付は時刻を持たない暦日。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
}

/// 永続化前の予約
///
/// IDは予約台帳が挿入時に採番する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub study_room_id: RoomId,
}

/// 確定した予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub study_room_id: RoomId,
}

impl Booking {
    /// 採番されたIDを付与して確定した予約を作る
    pub fn from_new(booking_id: BookingId, new_booking: NewBooking) -> Self {
        Self {
            booking_id,
            first_name: new_booking.first_name,
            last_name: new_booking.last_name,
            email: new_booking.email,
            date: new_booking.date,
            study_room_id: new_booking.study_room_id,
        }
    }
}

/// 予約処理の結果コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingCode {
    /// 部屋を割り当てて予約を保存した
    Success,
    /// 指定日に空き部屋がない（エラーではなく通常の結果）
    NoRoomAvailable,
}

/// 予約処理の結果
///
/// 結果コードに関わらず、リクエストの氏名・メール・日付をそのまま返す。
/// `booking_id`は`Success`の場合のみ`Some`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub code: BookingCode,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub booking_id: Option<BookingId>,
}

impl BookingResult {
    pub fn success(request: BookingRequest, booking_id: BookingId) -> Self {
        Self::echo(request, BookingCode::Success, Some(booking_id))
    }

    pub fn no_room_available(request: BookingRequest) -> Self {
        Self::echo(request, BookingCode::NoRoomAvailable, None)
    }

    fn echo(request: BookingRequest, code: BookingCode, booking_id: Option<BookingId>) -> Self {
        Self {
            code,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            date: request.date,
            booking_id,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == BookingCode::Success
    }
}

// ============================================================================
// 割り当てロジック（純粋関数）
// ============================================================================

/// 指定日に予約済みの部屋IDを集める
///
/// 台帳は日付で絞り込んだ予約を返すが、ここでも日付を比較する。
fn booked_room_ids(bookings: &[Booking], date: NaiveDate) -> HashSet<RoomId> {
    bookings
        .iter()
        .filter(|b| b.date == date)
        .map(|b| b.study_room_id)
        .collect()
}

/// 指定日に空いている部屋を返す
///
/// 全部屋から予約済みの部屋を除いた集合。順序はディレクトリの返した順のまま。
pub fn available_rooms<'a>(
    rooms: &'a [Room],
    bookings: &[Booking],
    date: NaiveDate,
) -> Vec<&'a Room> {
    let booked = booked_room_ids(bookings, date);
    rooms.iter().filter(|room| !booked.contains(&room.id)).collect()
}

/// 空いている部屋のうち、ディレクトリ順で最初の部屋を選ぶ（First-fit）
pub fn select_room<'a>(
    rooms: &'a [Room],
    bookings: &[Booking],
    date: NaiveDate,
) -> Option<&'a Room> {
    available_rooms(rooms, bookings, date).into_iter().next()
}

/// リクエストと選ばれた部屋から永続化前の予約を組み立てる
pub fn new_booking(request: &BookingRequest, room: &Room) -> NewBooking {
    NewBooking {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        date: request.date,
        study_room_id: room.id,
    }
}
