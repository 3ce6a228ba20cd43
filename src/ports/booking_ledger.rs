use crate::domain::{Booking, NewBooking};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約台帳ポート
///
/// 確定した予約の永続化と取得を抽象化する。
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// 予約を保存する
    ///
    /// 台帳が予約IDを採番し、IDを付与した予約を返す。
    /// 引数の値は変更しない。
    async fn insert(&self, booking: NewBooking) -> Result<Booking>;

    /// 予約を取得する
    ///
    /// `Some(date)`の場合はその日付に完全一致する予約のみ、
    /// `None`の場合は日付に関係なくすべての予約を返す。
    async fn get_bookings(&self, date: Option<NaiveDate>) -> Result<Vec<Booking>>;
}
