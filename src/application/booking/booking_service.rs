use crate::domain::{self, Booking, BookingRequest, BookingResult};
use crate::ports::*;
use chrono::NaiveDate;
use std::sync::Arc;

use super::allocation_locks::AllocationLocks;
use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
/// テストではインメモリ実装に差し替える。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub room_directory: Arc<dyn RoomDirectory>,
    pub booking_ledger: Arc<dyn BookingLedger>,
    pub allocation_locks: Arc<AllocationLocks>,
}

impl ServiceDependencies {
    /// 日付ごとの割り当てロックを有効にした依存関係を作る
    pub fn new(
        room_directory: Arc<dyn RoomDirectory>,
        booking_ledger: Arc<dyn BookingLedger>,
    ) -> Self {
        Self {
            room_directory,
            booking_ledger,
            allocation_locks: Arc::new(AllocationLocks::new()),
        }
    }
}

/// 自習室を予約する（純粋な関数）
///
/// 処理フロー：
/// 1. リクエストがなければ`InvalidArgument`（ポートには一切触れない）
/// 2. 指定日の予約を台帳から取得
/// 3. 全部屋をディレクトリから取得
/// 4. 予約済みの部屋を除いた最初の部屋を選ぶ（First-fit）
/// 5. 部屋があれば台帳に保存して`Success`、なければ`NoRoomAvailable`
///
/// 台帳への挿入は結果が`Success`の場合に限り、ちょうど1回行われる。
///
/// # 一貫性保証
///
/// 2〜5は同じ日付の割り当てロックの内側で行う（ロックが有効な場合）。
/// ロックはプロセス内でのみ有効。プロセスをまたぐ二重予約は
/// ストレージ側の一意制約に委ね、その場合は`LedgerError`になる。
///
/// # エラー
/// - InvalidArgument: リクエストがない
/// - LedgerError / RoomDirectoryError: ポートのI/Oエラー（変換せずに伝播）
pub async fn book_room(
    deps: &ServiceDependencies,
    request: Option<BookingRequest>,
) -> Result<BookingResult> {
    let request = request.ok_or(BookingApplicationError::InvalidArgument { param: "request" })?;

    let _guard = deps.allocation_locks.acquire(request.date).await;

    // 1. 指定日の予約済み部屋を確認
    let bookings = deps
        .booking_ledger
        .get_bookings(Some(request.date))
        .await
        .map_err(BookingApplicationError::LedgerError)?;

    // 2. 全部屋を取得
    let rooms = deps
        .room_directory
        .get_all_rooms()
        .await
        .map_err(BookingApplicationError::RoomDirectoryError)?;

    // 3. 空き部屋を選ぶ
    let Some(room) = domain::booking::select_room(&rooms, &bookings, request.date) else {
        tracing::info!(
            date = %request.date,
            rooms = rooms.len(),
            "no study room available"
        );
        return Ok(BookingResult::no_room_available(request));
    };

    tracing::debug!(date = %request.date, room_id = %room.id, "selected study room");

    // 4. 台帳に保存（IDは台帳が採番する）
    let booking = deps
        .booking_ledger
        .insert(domain::booking::new_booking(&request, room))
        .await
        .map_err(BookingApplicationError::LedgerError)?;

    tracing::info!(
        booking_id = %booking.booking_id,
        room_id = %booking.study_room_id,
        date = %booking.date,
        "study room booked"
    );

    Ok(BookingResult::success(request, booking.booking_id))
}

/// 予約一覧を取得する
///
/// 台帳の取得処理にそのまま委譲する。`None`なら日付に関係なく全件。
pub async fn list_bookings(
    deps: &ServiceDependencies,
    date: Option<NaiveDate>,
) -> Result<Vec<Booking>> {
    deps.booking_ledger
        .get_bookings(date)
        .await
        .map_err(BookingApplicationError::LedgerError)
}

/// 部屋一覧を取得する
pub async fn list_rooms(deps: &ServiceDependencies) -> Result<Vec<domain::Room>> {
    deps.room_directory
        .get_all_rooms()
        .await
        .map_err(BookingApplicationError::RoomDirectoryError)
}
