use chrono::NaiveDate;

/// 予約日が未来でない場合のメッセージ
pub const DATE_NOT_IN_FUTURE_MESSAGE: &str = "Date must be in the future";

/// 日付が`today`より後か（当日は不可）
///
/// `today`は呼び出し側が渡す。日付の規則を時計に依存させないため。
pub fn is_date_in_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}
