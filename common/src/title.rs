//! 結果表タイトルの解析
//!
//! タイトルセルは「第294回羽曳野レイティング（2024.5.12）」のような自由記述。
//! 読み仮名表記（「ダイ」「カイ」）で書かれる回もあるため、
//! 「ダイ」の有無で語彙を切り替えて同じ分割手順を適用する。

use crate::error::{Error, Result};
use crate::types::TitleMetadata;
use chrono::NaiveDate;

const RATING_MARKER: &str = "レイティング";
const DATE_OPEN: &str = "（";
const DATE_CLOSE: &str = "）";

/// タイトルの表記体系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleVocabulary {
    /// 第294回〜
    Kanji,
    /// ダイ294カイ〜
    Katakana,
}

impl TitleVocabulary {
    /// 「ダイ」を含めば読み仮名表記
    pub fn detect(title: &str) -> Self {
        if title.contains("ダイ") {
            TitleVocabulary::Katakana
        } else {
            TitleVocabulary::Kanji
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            TitleVocabulary::Kanji => "第",
            TitleVocabulary::Katakana => "ダイ",
        }
    }

    /// 回数の区切り。読み仮名表記でも「回」が使われていればそちらに従う
    fn counter(&self, text: &str) -> &'static str {
        match self {
            TitleVocabulary::Katakana if text.contains("カイ") => "カイ",
            _ => "回",
        }
    }

    /// 分割チェーンでメタデータを取り出す
    pub fn extract(&self, title: &str) -> Result<TitleMetadata> {
        let prefix = self.prefix();
        let body = segment(title, prefix, 1)
            .ok_or_else(|| Error::Parse(format!("「{}」が見つかりません: {}", prefix, title)))?;

        let counter = self.counter(body);
        let number_text = segment(body, counter, 0).unwrap_or_default().trim();
        let tournament_number: u32 = number_text
            .parse()
            .map_err(|_| Error::Parse(format!("開催回を数値に変換できません: {}", number_text)))?;

        let rest = segment(body, counter, 1)
            .ok_or_else(|| Error::Parse(format!("「{}」が見つかりません: {}", counter, title)))?;
        let place = segment(rest, RATING_MARKER, 0).unwrap_or_default().trim().to_string();

        let date_text = segment(rest, RATING_MARKER, 1)
            .and_then(|s| segment(s, DATE_OPEN, 1))
            .and_then(|s| segment(s, DATE_CLOSE, 0))
            .ok_or_else(|| Error::Parse(format!("日付が見つかりません: {}", title)))?;

        Ok(TitleMetadata {
            tournament_number: Some(tournament_number),
            place,
            date: Some(parse_dotted_date(date_text)?),
        })
    }
}

/// タイトルから開催回・場所・日付を取り出す
pub fn parse_title(title: &str) -> Result<TitleMetadata> {
    TitleVocabulary::detect(title).extract(title)
}

/// `sep` で分割した n 番目の区間（先頭は0）
fn segment<'a>(text: &'a str, sep: &str, n: usize) -> Option<&'a str> {
    text.split(sep).nth(n)
}

/// 2024.5.12 形式
fn parse_dotted_date(text: &str) -> Result<NaiveDate> {
    let parts = text
        .split('.')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::Parse(format!("日付を数値に変換できません: {}", text)))?;

    match parts.as_slice() {
        [year, month, day, ..] => NaiveDate::from_ymd_opt(*year as i32, *month, *day)
            .ok_or_else(|| Error::Parse(format!("存在しない日付です: {}", text))),
        _ => Err(Error::Parse(format!("日付の要素が足りません: {}", text))),
    }
}
