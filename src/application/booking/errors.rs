use thiserror::Error;

/// 予約アプリケーション層のエラー
///
/// 空き部屋がないことはエラーではない（`BookingCode::NoRoomAvailable`）。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 必須の引数が渡されなかった
    #[error("Value cannot be null. (Parameter '{param}')")]
    InvalidArgument { param: &'static str },

    /// RoomDirectoryのエラー
    #[error("Room directory error")]
    RoomDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookingLedgerのエラー
    #[error("Booking ledger error")]
    LedgerError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
