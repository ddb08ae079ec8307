//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// 結果表の形状エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("テーブルが見つかりません")]
    NoTable,

    #[error("{column}列目を整数に変換できません: {cell}")]
    NonNumericColumn { column: usize, cell: String },

    #[error("会員番号{ids}件とレーティング{ratings}件の数が一致しません")]
    PairingMismatch { ids: usize, ratings: usize },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
