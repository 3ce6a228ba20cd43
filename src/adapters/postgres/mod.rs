pub mod booking_ledger;
pub mod room_directory;

// パブリックに型を再エクスポート
pub use booking_ledger::BookingLedger as PostgresBookingLedger;
pub use room_directory::RoomDirectory as PostgresRoomDirectory;
