//! 抽出結果の型定義
//!
//! - ParticipantRecord: OCRテキストから得た大会前レコード
//! - ResultRow: 結果表から得た大会後レコード
//! - TitleMetadata: 結果表タイトルセルのメタデータ
//! - RatingChange: 両者を会員番号で突き合わせた増減

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 大会前の参加者レコード（OCRテキスト由来）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    /// 会員番号（テキスト中の6〜8桁の数字列そのまま、正規化前）
    pub member_id: String,

    /// 氏名（かな・漢字・英字を含む候補のみ）
    #[serde(default)]
    pub name: Option<String>,

    /// 大会前レーティング
    #[serde(default)]
    pub rating_before: Option<u32>,
}

/// 大会後の結果行（結果表由来）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub place: String,
    pub tournament_number: u32,
    pub date: Option<NaiveDate>,
    pub member_id: u64,
    pub rating_after: u32,
}

/// 結果表タイトルから復元したメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleMetadata {
    /// 開催回
    pub tournament_number: Option<u32>,
    /// 開催場所（解析失敗時は空文字）
    pub place: String,
    /// 開催日
    pub date: Option<NaiveDate>,
}

/// 会員番号で突き合わせたレーティング増減
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub member_id: u64,
    pub name: String,
    pub rating_before: Option<u32>,
    pub rating_after: Option<u32>,
    /// 大会後 - 大会前（どちらかが欠けていればNone）
    pub delta: Option<i64>,
}
