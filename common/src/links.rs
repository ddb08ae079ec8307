//! 一覧ページのリンク・フレーム探索

use scraper::{Html, Selector};

lazy_static::lazy_static! {
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a").unwrap();
    static ref FRAME_SELECTOR: Selector = Selector::parse("frame").unwrap();
    static ref IFRAME_SELECTOR: Selector = Selector::parse("iframe").unwrap();
}

/// リンクテキストに開催回の数字を含む最初のアンカーのhrefを返す
///
/// 数字の境界は見ないため、29回の検索は「293」を含むリンクにも一致する。
/// hrefが無いアンカーは空文字を返す（呼び出し側で一覧ページ自身に解決される）。
pub fn find_tournament_link(html: &str, tournament_number: u32) -> Option<String> {
    let needle = tournament_number.to_string();
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .find(|a| a.text().collect::<String>().contains(&needle))
        .map(|a| a.value().attr("href").unwrap_or("").replace("./", ""))
}

/// 最初の frame（無ければ iframe）の src を返す
pub fn find_frame_src(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let frame = document
        .select(&FRAME_SELECTOR)
        .next()
        .or_else(|| document.select(&IFRAME_SELECTOR).next())?;

    frame
        .value()
        .attr("src")
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}
