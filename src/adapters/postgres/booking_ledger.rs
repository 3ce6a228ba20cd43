use crate::domain::{Booking, BookingId, NewBooking, RoomId};
use crate::ports::booking_ledger::{BookingLedger as BookingLedgerTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookingに変換する
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    Ok(Booking {
        booking_id: BookingId::new(row.try_get("booking_id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        date: row.try_get("date")?,
        study_room_id: RoomId::new(row.try_get("study_room_id")?),
    })
}

/// BookingLedgerのPostgreSQL実装
///
/// 予約IDは`study_room_bookings.booking_id`のSERIALで採番される。
/// `(date, study_room_id)`の一意制約により、同じ日に同じ部屋を
/// 二重に予約しようとした挿入はエラーになる。
pub struct BookingLedger {
    pool: PgPool,
}

impl BookingLedger {
    /// PostgreSQLコネクションプールから新しいBookingLedgerを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingLedgerTrait for BookingLedger {
    /// 予約を挿入し、採番されたIDを付与して返す
    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let booking_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO study_room_bookings (
                first_name,
                last_name,
                email,
                date,
                study_room_id
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING booking_id
            "#,
        )
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(&booking.email)
        .bind(booking.date)
        .bind(booking.study_room_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(Booking::from_new(BookingId::new(booking_id), booking))
    }

    /// 日付で絞り込んだ予約を取得（`None`なら全件）
    async fn get_bookings(&self, date: Option<NaiveDate>) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                first_name,
                last_name,
                email,
                date,
                study_room_id
            FROM study_room_bookings
            WHERE $1::date IS NULL OR date = $1
            ORDER BY booking_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
