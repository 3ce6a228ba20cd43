use serde::{Deserialize, Serialize};

use super::RoomId;

/// 自習室 - 予約可能な部屋の参照データ
///
/// マイグレーションのシードなど、アプリケーションの外で作成される。
/// 割り当て処理が部屋を変更することはない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_name: String,
    pub room_number: String,
}

impl Room {
    pub fn new(id: RoomId, room_name: impl Into<String>, room_number: impl Into<String>) -> Self {
        Self {
            id,
            room_name: room_name.into(),
            room_number: room_number.into(),
        }
    }
}
