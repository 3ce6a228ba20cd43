use crate::domain::Room;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 部屋ディレクトリポート
///
/// 予約可能な部屋の唯一の情報源。読み取り専用。
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// すべての部屋を取得する
    ///
    /// 絞り込みやページングは行わない。返した順序が割り当ての優先順になる。
    async fn get_all_rooms(&self) -> Result<Vec<Room>>;
}
