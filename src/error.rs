use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("参加者データが抽出できませんでした。貼り付けテキストを確認してください")]
    MalformedInput,

    #[error("テキスト中から大会番号（例: 第294回{0}RS大会）を検出できませんでした")]
    TournamentNumberNotFound(String),

    #[error("第{tournament}回が見つかりません（該当リンクなし）")]
    LookupMiss { tournament: u32 },

    #[error("{attempts}回試しましたが接続できませんでした: {url}（{message}）")]
    Network {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("URLが不正: {0}")]
    InvalidUrl(String),

    #[error("テーブルが見つかりませんでした: {url}")]
    NoTable { url: String },

    #[error("結果表の形式が不正: {0}")]
    TableShape(String),

    #[error("タスク実行エラー: {0}")]
    Task(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] tt_rating_common::Error),
}

pub type Result<T> = std::result::Result<T, RatingError>;
