//! 会員番号の正規化
//!
//! カメラ読み取りの慣例で、8桁の会員番号は先頭1桁が余分に付いている。
//! 数字以外を除いた上で8桁なら先頭を落として整数にする。

/// 欠損扱いする表記
const MISSING_MARKERS: &[&str] = &["nan", "none", "null", "na", "n/a"];

/// 会員番号テキストを整数に正規化する
///
/// # Returns
/// * `None` - 空・欠損表記・数字を含まない
pub fn normalize_member_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    let digits = if digits.len() == 8 { &digits[1..] } else { digits.as_str() };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
