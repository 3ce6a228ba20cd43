pub mod booking_ledger;
pub mod room_directory;

pub use booking_ledger::BookingLedger;
pub use room_directory::RoomDirectory;
