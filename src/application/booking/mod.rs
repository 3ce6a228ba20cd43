mod allocation_locks;
mod booking_service;
mod errors;

pub use allocation_locks::{AllocationGuard, AllocationLocks};
pub use booking_service::{ServiceDependencies, book_room, list_bookings, list_rooms};
pub use errors::{BookingApplicationError, Result};
