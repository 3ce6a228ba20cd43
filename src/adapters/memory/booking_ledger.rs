use crate::domain::{Booking, BookingId, NewBooking};
use crate::ports::booking_ledger::{BookingLedger as BookingLedgerTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Mutex, PoisonError};

/// BookingLedgerのインメモリ実装
///
/// 予約IDは1から順に採番する。取得結果は挿入順。
pub struct BookingLedger {
    state: Mutex<LedgerState>,
}

struct LedgerState {
    bookings: Vec<Booking>,
    next_id: i32,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                bookings: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// 保存済みの予約件数
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .bookings
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingLedgerTrait for BookingLedger {
    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let booking_id = BookingId::new(state.next_id);
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or("booking id sequence exhausted")?;

        let booking = Booking::from_new(booking_id, booking);
        state.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn get_bookings(&self, date: Option<NaiveDate>) -> Result<Vec<Booking>> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .bookings
            .iter()
            .filter(|b| date.is_none_or(|d| b.date == d))
            .cloned()
            .collect())
    }
}
