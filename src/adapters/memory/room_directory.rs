use crate::domain::{Room, RoomId};
use crate::ports::room_directory::{Result, RoomDirectory as RoomDirectoryTrait};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// RoomDirectoryのインメモリ実装
///
/// 部屋は登録順に返す。
pub struct RoomDirectory {
    rooms: Mutex<Vec<Room>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::with_rooms(Vec::new())
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms: Mutex::new(rooms),
        }
    }

    /// マイグレーションと同じ部屋で初期化する
    pub fn with_default_rooms() -> Self {
        Self::with_rooms(default_rooms())
    }

    /// 部屋を追加（テストのセットアップ用）
    pub fn add_room(&self, room: Room) {
        self.rooms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(room);
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomDirectoryTrait for RoomDirectory {
    async fn get_all_rooms(&self) -> Result<Vec<Room>> {
        Ok(self
            .rooms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

/// `migrations/20240101000001_create_study_rooms.sql`で投入される部屋
pub fn default_rooms() -> Vec<Room> {
    vec![
        Room::new(RoomId::new(1), "Michigan", "A202"),
        Room::new(RoomId::new(2), "Oregon", "A203"),
        Room::new(RoomId::new(3), "Viking", "A204"),
    ]
}
