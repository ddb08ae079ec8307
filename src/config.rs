use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 羽曳野レイティングの一覧ページ
pub const DEFAULT_INDEX_URL: &str = "https://www.cbii.kutc.kansai-u.ac.jp/tt_rating/habikino.html";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 大会一覧ページ
    pub index_url: String,
    pub user_agent: String,
    /// 1回のリクエストのタイムアウト
    pub timeout_seconds: u64,
    /// 大会名の会場（「第N回<会場>RS大会」の検出に使用）
    pub venue: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.into(),
            user_agent: "Mozilla/5.0".into(), // ブラウザっぽくする
            timeout_seconds: 10,
            venue: tt_rating_common::DEFAULT_VENUE.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RatingError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tt-rating").join("config.json"))
    }

    pub fn set_index_url(&mut self, url: String) -> Result<()> {
        reqwest::Url::parse(&url).map_err(|e| RatingError::Config(format!("URLが不正: {} ({})", url, e)))?;
        self.index_url = url;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(RatingError::Config("タイムアウトは1秒以上を指定してください".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}
