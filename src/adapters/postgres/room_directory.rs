use crate::domain::{Room, RoomId};
use crate::ports::room_directory::{Result, RoomDirectory as RoomDirectoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_room(row: &PgRow) -> Result<Room> {
    Ok(Room {
        id: RoomId::new(row.try_get("id")?),
        room_name: row.try_get("room_name")?,
        room_number: row.try_get("room_number")?,
    })
}

/// RoomDirectoryのPostgreSQL実装
///
/// `study_rooms`テーブルを読む。First-fitの結果が呼び出しごとに変わらないよう、
/// ID順に並べて返す。
pub struct RoomDirectory {
    pool: PgPool,
}

impl RoomDirectory {
    /// PostgreSQLコネクションプールから新しいRoomDirectoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomDirectoryTrait for RoomDirectory {
    async fn get_all_rooms(&self) -> Result<Vec<Room>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_name, room_number
            FROM study_rooms
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_room).collect()
    }
}
