//! 行分類（見出し行 / 氏名候補）
//!
//! 名簿写真のOCRテキストは見出し・日付・罫線が参加者データと混在する。
//! 判定はこの名簿の語彙に合わせたヒューリスティックで、誤判定は許容する。
//! 判定順序を変えると境界ケースの結果が変わるため、順序は固定。

use regex::Regex;

/// 見出し語彙（列名・大会名・グループ表記など）
const HEADING_MARKERS: &[&str] = &[
    "参加者", "第", "大会", "グループ", "ブロック", "コート",
    "会員番号", "氏名", "R", "Z=", "* =", "上位希望者", "回", "合番号",
];

lazy_static::lazy_static! {
    // 罫線・記号だけの行
    static ref RULE_LINE_RE: Regex = Regex::new(r"^[|()\-*]+$").unwrap();
    // 2024/5/12 形式の日付
    static ref SLASH_DATE_RE: Regex = Regex::new(r"[0-9０-９]{4}/[0-9０-９]{1,2}/[0-9０-９]{1,2}").unwrap();
    // 「2024年」「24年」
    static ref YEAR_RE: Regex = Regex::new(r"[0-9０-９]{2,4}年").unwrap();
    // かな・カナ・漢字・英字
    static ref NAME_CHAR_RE: Regex = Regex::new(r"[\u{3040}-\u{30ff}\u{4e00}-\u{9fff}A-Za-z]").unwrap();
}

/// 見出し・ノイズ行かどうか
pub fn is_heading(line: &str) -> bool {
    if HEADING_MARKERS.iter().any(|m| line.contains(m)) {
        return true;
    }
    if RULE_LINE_RE.is_match(line) {
        return true;
    }
    SLASH_DATE_RE.is_match(line) || (line.contains('年') && line.contains('月'))
}

/// 氏名候補かどうか
pub fn is_name_candidate(line: &str) -> bool {
    if is_heading(line) {
        return false;
    }
    if YEAR_RE.is_match(line) || line.contains('月') {
        return false;
    }

    let total = line.chars().count();
    let digits = line.chars().filter(|c| is_digit_char(*c)).count();
    if total > 0 && digits * 2 > total {
        return false;
    }

    NAME_CHAR_RE.is_match(line)
}

/// 半角・全角の数字
pub(crate) fn is_digit_char(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}
