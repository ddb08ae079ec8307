//! OCRテキストパーサー
//!
//! 名簿写真をGoogleレンズ等で文字認識したテキストから
//! （会員番号, 氏名, 大会前レーティング）を復元する。
//!
//! ## 処理フロー
//! 1. 全角スペース・BOM・NBSP・全角数字を正規化し、空行を除いて行分割
//! 2. 6〜8桁の数字列を会員番号候補として左から順に取り出す
//! 3. 同じ行の残りから氏名・4桁レーティングを探す
//! 4. 氏名が無ければ後続5行を先読み（見出し行は飛ばす）
//! 5. レーティングが無ければ8行以内の最初の4桁を採用（「初」で打ち切り）
//! 6. 氏名を整形し、会員番号の重複は先勝ちで捨てる

use crate::classifier::{is_heading, is_name_candidate};
use crate::types::ParticipantRecord;
use regex::Regex;
use std::collections::HashSet;

/// 氏名の先読み行数
const NAME_LOOKAHEAD: usize = 5;
/// レーティングの探索行数（会員番号の行を含む）
const RATING_LOOKAHEAD: usize = 8;
/// 初参加マーカー（この行以降のレーティングは別人のもの）
const FIRST_APPEARANCE_MARKER: char = '初';

/// 大会名の既定会場
pub const DEFAULT_VENUE: &str = "羽曳野";

lazy_static::lazy_static! {
    static ref MEMBER_ID_RE: Regex = Regex::new(r"[0-9]{6,8}").unwrap();
    static ref DIGIT_RUN_RE: Regex = Regex::new(r"[0-9]+").unwrap();
    static ref RATING_LINE_RE: Regex = Regex::new(r"^[0-9]{4}$").unwrap();
    static ref TRAILING_NUMBER_RE: Regex = Regex::new(r"\b[0-9]+\b$").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    // 改行扱いする区切り（CR単独、縦タブ、改ページ、U+2028/2029 等も含む）
    static ref LINE_BREAK_RE: Regex =
        Regex::new(r"\r\n|[\r\n\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").unwrap();
}

/// 独立した4桁の数字（前後が数字でない）
#[derive(Debug, Clone, Copy)]
struct RatingMatch {
    start: usize,
    value: u32,
}

fn find_rating(s: &str) -> Option<RatingMatch> {
    DIGIT_RUN_RE
        .find_iter(s)
        .find(|m| m.as_str().len() == 4)
        .and_then(|m| {
            m.as_str().parse().ok().map(|value| RatingMatch {
                start: m.start(),
                value,
            })
        })
}

/// 全角スペース・BOM・NBSPを空白に、全角数字を半角に揃える
pub fn preprocess(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\u{feff}')
        .map(|c| match c {
            '\u{3000}' | '\u{a0}' => ' ',
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// 貼り付けテキストから参加者レコードを抽出する
///
/// 出力順は入力の行順。重複した会員番号は最初の出現のみ残す。
/// 該当が無ければ空のVecを返す（エラーにはしない）。
pub fn parse_records(raw_text: &str) -> Vec<ParticipantRecord> {
    let text = preprocess(raw_text);
    let lines: Vec<&str> = LINE_BREAK_RE
        .split(&text)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut records = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        for id_match in MEMBER_ID_RE.find_iter(line) {
            let member_id = id_match.as_str();
            let remainder = line[id_match.end()..].trim();

            let (mut name, mut rating_before) = scan_remainder(remainder);

            if name.is_none() {
                let (lookahead_name, lookahead_rating) = scan_following_lines(&lines, i);
                name = lookahead_name;
                if lookahead_rating.is_some() {
                    rating_before = lookahead_rating;
                }
            }

            if rating_before.is_none() {
                rating_before = scan_rating_window(&lines, i);
            }

            let name = name.and_then(|n| sanitize_name(&n));

            if !seen_ids.insert(member_id.to_string()) {
                continue;
            }
            records.push(ParticipantRecord {
                member_id: member_id.to_string(),
                name,
                rating_before,
            });
        }
    }

    records
}

/// 会員番号に続く同一行の残りから氏名・レーティングを取る
fn scan_remainder(remainder: &str) -> (Option<String>, Option<u32>) {
    if remainder.is_empty() {
        return (None, None);
    }

    if let Some(rating) = find_rating(remainder) {
        let candidate = remainder[..rating.start].trim();
        let name = (!candidate.is_empty() && is_name_candidate(candidate))
            .then(|| candidate.to_string());
        return (name, Some(rating.value));
    }

    if is_name_candidate(remainder) {
        (Some(remainder.to_string()), None)
    } else {
        (None, None)
    }
}

/// 後続行から氏名（と、あればレーティング）を探す
fn scan_following_lines(lines: &[&str], index: usize) -> (Option<String>, Option<u32>) {
    let end = (index + 1 + NAME_LOOKAHEAD).min(lines.len());
    let mut rating_before = None;

    for s in lines.iter().take(end).skip(index + 1) {
        if is_heading(s) {
            continue;
        }

        if let Some(rating) = find_rating(s) {
            if RATING_LINE_RE.is_match(s) {
                rating_before = Some(rating.value);
                continue;
            }
            let candidate = s[..rating.start].trim();
            if !candidate.is_empty() && is_name_candidate(candidate) {
                return (Some(candidate.to_string()), Some(rating.value));
            }
        }

        if is_name_candidate(s) {
            return match find_rating(s) {
                Some(rating) => (Some(s[..rating.start].trim().to_string()), Some(rating.value)),
                None => (Some(s.to_string()), rating_before),
            };
        }
    }

    (None, rating_before)
}

/// 会員番号の行から最初の4桁を探す（初参加マーカーで打ち切り）
fn scan_rating_window(lines: &[&str], index: usize) -> Option<u32> {
    let end = (index + RATING_LOOKAHEAD).min(lines.len());
    for s in lines.iter().take(end).skip(index) {
        if let Some(rating) = find_rating(s) {
            return Some(rating.value);
        }
        if s.contains(FIRST_APPEARANCE_MARKER) {
            return None;
        }
    }
    None
}

/// 氏名を整形する
///
/// - 会員番号らしき数字列以降を削除
/// - 末尾の数字トークンを削除
/// - 埋め込まれた4桁レーティングを削除
/// - 連続空白を1つに
fn sanitize_name(name: &str) -> Option<String> {
    let mut name = name;
    if let Some(m) = MEMBER_ID_RE.find(name) {
        name = name[..m.start()].trim();
    }
    let name = TRAILING_NUMBER_RE.replace(name, "");
    let name = DIGIT_RUN_RE.replace_all(name.trim(), |caps: &regex::Captures| {
        if caps[0].len() == 4 {
            String::new()
        } else {
            caps[0].to_string()
        }
    });
    let name = WHITESPACE_RE.replace_all(name.trim(), " ");
    let name = name.trim();

    (!name.is_empty()).then(|| name.to_string())
}

/// 「第294回羽曳野RS大会」から開催回を取り出す
pub fn extract_tournament_number(text: &str, venue: &str) -> Option<u32> {
    let pattern = format!(
        r"第\s*([0-9]+)\s*回\s*{}RS大会",
        regex::escape(venue)
    );
    let re = Regex::new(&pattern).ok()?;
    let text = preprocess(text);
    re.captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: Option<&str>, rating: Option<u32>) -> ParticipantRecord {
        ParticipantRecord {
            member_id: id.to_string(),
            name: name.map(str::to_string),
            rating_before: rating,
        }
    }

    #[test]
    fn test_single_line_record() {
        let records = parse_records("12345678 山田太郎1850");
        assert_eq!(records, vec![record("12345678", Some("山田太郎"), Some(1850))]);
    }

    #[test]
    fn test_lookahead_across_heading() {
        let text = "12345678\n会員番号 氏名\n山田太郎\n1850";
        let records = parse_records(text);
        assert_eq!(records, vec![record("12345678", Some("山田太郎"), Some(1850))]);
    }

    #[test]
    fn test_carriage_return_only_line_breaks() {
        let text = "12345678\r会員番号 氏名\r山田太郎\r1850";
        let records = parse_records(text);
        assert_eq!(records, vec![record("12345678", Some("山田太郎"), Some(1850))]);
    }

    #[test]
    fn test_unicode_line_separators() {
        let text = "1234567\u{2028}山田太郎\u{2029}1850\x0c7654321 鈴木花子\u{85}1600";
        let records = parse_records(text);
        assert_eq!(
            records,
            vec![
                record("1234567", Some("山田太郎"), Some(1850)),
                record("7654321", Some("鈴木花子"), Some(1600)),
            ]
        );
    }

    #[test]
    fn test_first_appearance_stops_rating_scan() {
        let text = "1234567 山田太郎\n初\n1700";
        let records = parse_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("山田太郎"));
        assert_eq!(records[0].rating_before, None);
    }

    #[test]
    fn test_no_member_ids() {
        assert!(parse_records("第294回羽曳野RS大会\n山田太郎 1850\n").is_empty());
        assert!(parse_records("").is_empty());
    }

    #[test]
    fn test_duplicates_first_wins() {
        let text = "1234567 山田太郎 1850\n1234567 鈴木一郎 1700";
        let records = parse_records(text);
        assert_eq!(records, vec![record("1234567", Some("山田太郎"), Some(1850))]);
    }

    #[test]
    fn test_multiple_ids_on_one_line() {
        let text = "1234567 山田 1850 7654321 鈴木 1700";
        let records = parse_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record("1234567", Some("山田"), Some(1850)));
        assert_eq!(records[1], record("7654321", Some("鈴木"), Some(1700)));
    }

    #[test]
    fn test_fullwidth_spaces_and_digits() {
        let text = "\u{feff}１２３４５６７\u{3000}山田\u{a0}太郎\u{3000}１８５０";
        let records = parse_records(text);
        assert_eq!(records, vec![record("1234567", Some("山田 太郎"), Some(1850))]);
    }

    #[test]
    fn test_bare_rating_line_then_name() {
        let text = "1234567\n1850\n山田太郎";
        let records = parse_records(text);
        assert_eq!(records, vec![record("1234567", Some("山田太郎"), Some(1850))]);
    }

    #[test]
    fn test_name_without_rating_anywhere() {
        let records = parse_records("1234567 山田太郎");
        assert_eq!(records, vec![record("1234567", Some("山田太郎"), None)]);
    }

    #[test]
    fn test_rating_only_line_is_not_a_name() {
        let records = parse_records("1234567 1850");
        assert_eq!(records, vec![record("1234567", None, Some(1850))]);
    }

    #[test]
    fn test_longer_digit_runs_are_not_ratings() {
        // 5桁は独立した4桁ではない
        let records = parse_records("1234567 山田 18500");
        assert_eq!(records[0].rating_before, None);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("山田  太郎"), Some("山田 太郎".to_string()));
        assert_eq!(sanitize_name("山田 1234567 鈴木"), Some("山田".to_string()));
        assert_eq!(sanitize_name("Smith 12"), Some("Smith".to_string()));
        assert_eq!(sanitize_name("1850"), None);
        assert_eq!(sanitize_name("   "), None);
    }

    #[test]
    fn test_parse_is_idempotent_on_output() {
        let text = "1234567 山田太郎 1850\n7654321 鈴木一郎 1700";
        let first = parse_records(text);
        let rendered: String = first
            .iter()
            .map(|r| format!("{} {} {}\n", r.member_id, r.name.clone().unwrap_or_default(), r.rating_before.unwrap()))
            .collect();
        assert_eq!(parse_records(&rendered), first);
    }

    #[test]
    fn test_extract_tournament_number() {
        assert_eq!(extract_tournament_number("第294回羽曳野RS大会 参加者", DEFAULT_VENUE), Some(294));
        assert_eq!(extract_tournament_number("第 ２９４ 回 羽曳野RS大会", DEFAULT_VENUE), Some(294));
        assert_eq!(extract_tournament_number("第294回堺RS大会", DEFAULT_VENUE), None);
        assert_eq!(extract_tournament_number("第294回堺RS大会", "堺"), Some(294));
    }
}
