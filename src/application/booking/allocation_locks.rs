use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Arc<Mutex<HashMap<NaiveDate, Arc<AsyncMutex<()>>>>>;

/// 日付ごとの割り当てロック
///
/// 同じ日付への予約処理（空き確認から挿入まで）を1プロセス内で直列化する。
/// 異なる日付の予約は並行に進む。
/// 無効化した場合は何も待たない（ロックなしの読み取り→書き込み）。
///
/// エントリは保持者・待機者がいなくなった時点で削除される。
pub struct AllocationLocks {
    enabled: bool,
    locks: LockMap,
}

/// 取得したロック。ドロップで解放される
pub struct AllocationGuard {
    _held: Option<HeldLock>,
}

struct HeldLock {
    date: NaiveDate,
    locks: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl AllocationLocks {
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    pub fn disabled() -> Self {
        Self::with_enabled(false)
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 指定日付のロックを取得する
    pub async fn acquire(&self, date: NaiveDate) -> AllocationGuard {
        if !self.enabled {
            return AllocationGuard { _held: None };
        }

        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(date).or_default())
        };

        AllocationGuard {
            _held: Some(HeldLock {
                date,
                locks: Arc::clone(&self.locks),
                guard: Some(lock.lock_owned().await),
            }),
        }
    }

    /// 現在マップに残っている日付の数
    pub fn tracked_dates(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for AllocationLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HeldLock {
    fn drop(&mut self) {
        // 先に解放し、待機者がいなければエントリを削除する
        drop(self.guard.take());

        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // 待機者は外側のロック内でArcを複製するので、残り1ならマップだけが保持している
        if locks
            .get(&self.date)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.date);
        }
    }
}
