pub mod booking;
pub mod room;
pub mod validation;
pub mod value_objects;

pub use booking::{Booking, BookingCode, BookingRequest, BookingResult, NewBooking};
pub use room::Room;
pub use value_objects::*;
