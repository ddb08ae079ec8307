//! HTTP取得とリトライ
//!
//! 取得は `Fetcher` トレイト越しに行い、テストでは偽の実装を差し込む。
//! リトライは `RetryPolicy`（3回・固定間隔）で包む。

use crate::config::Config;
use crate::error::{RatingError, Result};
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;

/// 最大試行回数
pub const MAX_ATTEMPTS: u32 = 3;
/// 試行間の待ち時間
pub const RETRY_DELAY: Duration = Duration::from_secs(1);
/// ページが文字コードを宣言していない場合の既定
pub const FALLBACK_CHARSET: &str = "Shift_JIS";

/// 取得したページ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// リダイレクト後の最終URL（相対リンクの解決基準）
    pub url: String,
    /// デコード済み本文
    pub body: String,
}

/// 1回の取得の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Transport(String),
}

/// HTTP GET の抽象
pub trait Fetcher {
    fn get(&self, url: &str) -> std::result::Result<Page, FetchError>;
}

/// reqwest（blocking）による実装
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RatingError::Config(format!("HTTPクライアントを作成できません: {}", e)))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> std::result::Result<Page, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        // Content-Type の charset が優先され、無ければ Shift_JIS で読む
        let body = response
            .text_with_charset(FALLBACK_CHARSET)
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Page { url: final_url, body })
    }
}

/// 固定間隔のリトライ方針
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay: RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// 待ち時間なし（テスト用）
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// `url` を取得する。全試行が失敗したら `RatingError::Network`
    pub fn fetch<F: Fetcher + ?Sized>(&self, fetcher: &F, url: &str) -> Result<Page> {
        let attempts = self.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            debug!("GET {} ({}/{})", url, attempt, attempts);
            match fetcher.get(url) {
                Ok(page) => return Ok(page),
                Err(e) => {
                    warn!("接続失敗: {} （{}/{}）", e, attempt, attempts);
                    last_error = Some(e);
                    if attempt < attempts && !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                }
            }
        }

        Err(RatingError::Network {
            url: url.to_string(),
            attempts,
            message: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}
