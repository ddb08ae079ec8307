//! 開催回から結果表URLを探す
//!
//! 一覧ページ → リンクテキストに開催回を含むページ → frame/iframe の src
//! の順にたどる。

use crate::error::{RatingError, Result};
use crate::net::{Fetcher, RetryPolicy};
use log::{debug, info};
use reqwest::Url;
use tt_rating_common::{find_frame_src, find_tournament_link};

pub struct Locator<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    retry: RetryPolicy,
    index_url: String,
}

impl<'a, F: Fetcher + ?Sized> Locator<'a, F> {
    pub fn new(fetcher: &'a F, retry: RetryPolicy, index_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            retry,
            index_url: index_url.into(),
        }
    }

    /// 結果表のURLを返す
    ///
    /// # Returns
    /// * `Ok(None)` - 該当リンクなし
    /// * `Err(RatingError::Network)` - 取得リトライが尽きた
    pub fn locate(&self, tournament_number: u32) -> Result<Option<String>> {
        let index = self.retry.fetch(self.fetcher, &self.index_url)?;

        let Some(href) = find_tournament_link(&index.body, tournament_number) else {
            info!("第{}回のリンクが一覧ページにありません", tournament_number);
            return Ok(None);
        };
        let page_url = resolve(&index.url, &href)?;
        debug!("第{}回のページ: {}", tournament_number, page_url);

        let page = self.retry.fetch(self.fetcher, &page_url)?;
        match find_frame_src(&page.body) {
            Some(src) => {
                let sheet_url = resolve(&page.url, &src)?;
                debug!("フレーム先: {}", sheet_url);
                Ok(Some(sheet_url))
            }
            None => Ok(Some(page.url)),
        }
    }
}

/// `base` を基準に相対URLを解決する
pub fn resolve(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| RatingError::InvalidUrl(format!("{} ({})", base, e)))?;
    base.join(href)
        .map(|u| u.to_string())
        .map_err(|e| RatingError::InvalidUrl(format!("{} ({})", href, e)))
}
