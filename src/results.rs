//! 結果表の取得
//!
//! 解析自体は `tt_rating_common::table` が行う。ここでは取得とエラーの振り分けだけ。

use crate::error::{RatingError, Result};
use crate::locator::Locator;
use crate::net::{Fetcher, RetryPolicy};
use log::info;
use tt_rating_common::{parse_results_html, ResultsTable, TableError};

/// `url` の最初の表を取得して結果行に変換する
///
/// # Returns
/// * `Err(RatingError::NoTable)` - 表が無い
/// * `Err(RatingError::TableShape)` - 列の形が壊れている
/// * `Err(RatingError::Network)` - 取得リトライが尽きた
pub fn fetch_results<F: Fetcher + ?Sized>(
    fetcher: &F,
    retry: RetryPolicy,
    url: &str,
    tournament_number: u32,
) -> Result<ResultsTable> {
    let page = retry.fetch(fetcher, url)?;

    parse_results_html(&page.body, tournament_number).map_err(|e| match e {
        tt_rating_common::Error::Table(TableError::NoTable) => RatingError::NoTable { url: url.to_string() },
        tt_rating_common::Error::Table(shape) => RatingError::TableShape(shape.to_string()),
        other => RatingError::Common(other),
    })
}

/// 開催回から結果表までを一括で取得する
///
/// 該当リンクが無い場合は `RatingError::LookupMiss`。
pub fn load_tournament<F: Fetcher + ?Sized>(
    fetcher: &F,
    retry: RetryPolicy,
    index_url: &str,
    tournament_number: u32,
) -> Result<(String, ResultsTable)> {
    let sheet_url = Locator::new(fetcher, retry, index_url)
        .locate(tournament_number)?
        .ok_or(RatingError::LookupMiss { tournament: tournament_number })?;
    info!("読み込み先 URL: {}", sheet_url);

    let table = fetch_results(fetcher, retry, &sheet_url, tournament_number)?;
    Ok((sheet_url, table))
}
