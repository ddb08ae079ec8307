//! 結果表の正規化
//!
//! Excelから書き出されたHTML表は、空行・空列・見出し行が混ざり、
//! 会員番号列とレーティング列が左から交互に並ぶ。
//!
//! ## 処理フロー
//! 1. 最初の `<table>` をセル格子に展開（colspan/rowspanは値を複製）
//! 2. 格子の (1, 1) セルからタイトルを解析（失敗しても続行）
//! 3. 全空行を削除 → 非空セルが3未満の列を削除 → 先頭行を削除
//! 4. 偶数列を会員番号、奇数列をレーティングとして列順に連結し、位置で対にする

use crate::error::{Result, TableError};
use crate::title::parse_title;
use crate::types::{ResultRow, TitleMetadata};
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

/// セル格子（空セルはNone）
pub type Grid = Vec<Vec<Option<String>>>;

/// 列を残すのに必要な非空セル数
const MIN_COLUMN_CELLS: usize = 3;
/// colspan/rowspan の上限（壊れた属性値対策）
const MAX_SPAN: usize = 1000;

lazy_static::lazy_static! {
    static ref TABLE_SELECTOR: Selector = Selector::parse("table").unwrap();
    static ref ROW_SELECTOR: Selector = Selector::parse("tr").unwrap();
}

/// 結果表の解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    pub metadata: TitleMetadata,
    pub rows: Vec<ResultRow>,
}

/// 結果表HTMLを解析する
///
/// # Arguments
/// * `html` - 結果表ページのHTML（デコード済み）
/// * `requested_number` - タイトルから開催回が取れなかった場合に使う開催回
///
/// # Returns
/// * `Err(TableError::NoTable)` - 表が無い
/// * `Err(TableError::NonNumericColumn / PairingMismatch)` - 列の形が壊れている
pub fn parse_results_html(html: &str, requested_number: u32) -> Result<ResultsTable> {
    let grid = extract_first_table(html).ok_or(TableError::NoTable)?;
    debug!("結果表: {}行 x {}列", grid.len(), grid.first().map_or(0, Vec::len));

    let metadata = match title_cell(&grid).map(parse_title) {
        Some(Ok(metadata)) => metadata,
        Some(Err(e)) => {
            warn!("タイトル解析に失敗しましたが続行します: {}", e);
            TitleMetadata::default()
        }
        None => {
            warn!("タイトルセルが空のため、場所と日付なしで続行します");
            TitleMetadata::default()
        }
    };

    let pairs = pair_columns(&reshape(grid))?;
    let tournament_number = metadata.tournament_number.unwrap_or(requested_number);

    let rows = pairs
        .into_iter()
        .map(|(member_id, rating_after)| ResultRow {
            place: metadata.place.clone(),
            tournament_number,
            date: metadata.date,
            member_id,
            rating_after,
        })
        .collect();

    Ok(ResultsTable { metadata, rows })
}

fn title_cell(grid: &Grid) -> Option<&str> {
    grid.get(1)?.get(1)?.as_deref()
}

/// 最初の `<table>` をセル格子に展開する（行の長さは最大列数に揃える）
pub fn extract_first_table(html: &str) -> Option<Grid> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE_SELECTOR).next()?;

    let mut grid: Grid = Vec::new();
    // 列ごとの (残り行数, 値) ― rowspan の持ち越し
    let mut carry: Vec<(usize, Option<String>)> = Vec::new();

    for tr in table.select(&ROW_SELECTOR).filter(|tr| belongs_to(tr, &table)) {
        let mut row: Vec<Option<String>> = Vec::new();

        for cell in tr.children().filter_map(ElementRef::wrap) {
            let tag = cell.value().name();
            if tag != "td" && tag != "th" {
                continue;
            }
            fill_carried(&mut row, &mut carry, false);

            let text = cell_text(&cell);
            let colspan = span_attr(&cell, "colspan");
            let rowspan = span_attr(&cell, "rowspan");
            for _ in 0..colspan {
                let col = row.len();
                if rowspan > 1 {
                    if carry.len() <= col {
                        carry.resize(col + 1, (0, None));
                    }
                    carry[col] = (rowspan - 1, text.clone());
                }
                row.push(text.clone());
            }
        }
        fill_carried(&mut row, &mut carry, true);
        grid.push(row);
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, None);
    }
    Some(grid)
}

/// 入れ子の表の行を除くため、最も近い `<table>` 祖先が `table` かを見る
fn belongs_to(tr: &ElementRef, table: &ElementRef) -> bool {
    tr.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "table")
        .map(|owner| owner.id())
        == Some(table.id())
}

/// rowspan で持ち越された値を埋める。`trailing` なら行末以降の列も埋める
fn fill_carried(row: &mut Vec<Option<String>>, carry: &mut [(usize, Option<String>)], trailing: bool) {
    loop {
        let col = row.len();
        match carry.get_mut(col) {
            Some((remaining, value)) if *remaining > 0 => {
                *remaining -= 1;
                row.push(value.clone());
            }
            _ => break,
        }
    }
    if !trailing {
        return;
    }
    for col in row.len()..carry.len() {
        let (remaining, value) = &mut carry[col];
        if *remaining > 0 {
            *remaining -= 1;
            row.resize(col, None);
            row.push(value.clone());
        }
    }
}

fn cell_text(cell: &ElementRef) -> Option<String> {
    let text = cell.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn span_attr(cell: &ElementRef, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}

/// 全空行・疎な列・先頭行を落とす
pub fn reshape(grid: Grid) -> Grid {
    let rows: Grid = grid
        .into_iter()
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let kept_columns: Vec<usize> = (0..width)
        .filter(|&col| {
            rows.iter()
                .filter(|row| row.get(col).is_some_and(Option::is_some))
                .count()
                >= MIN_COLUMN_CELLS
        })
        .collect();

    rows.into_iter()
        .skip(1)
        .map(|row| kept_columns.iter().map(|&col| row.get(col).cloned().flatten()).collect())
        .collect()
}

/// 偶数列を会員番号、奇数列をレーティングとして位置で対にする
///
/// 先頭セルが数値にならない列は、その1セルを捨てて再変換する。
pub fn pair_columns(grid: &Grid) -> std::result::Result<Vec<(u64, u32)>, TableError> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut member_ids: Vec<u64> = Vec::new();
    let mut ratings: Vec<u32> = Vec::new();

    for col in 0..width {
        let cells: Vec<&str> = grid
            .iter()
            .filter_map(|row| row.get(col).and_then(|c| c.as_deref()))
            .collect();

        if col % 2 == 0 {
            member_ids.extend(convert_column::<u64>(col, &cells)?);
        } else {
            ratings.extend(convert_column::<u32>(col, &cells)?);
        }
    }

    if member_ids.len() != ratings.len() {
        return Err(TableError::PairingMismatch {
            ids: member_ids.len(),
            ratings: ratings.len(),
        });
    }
    Ok(member_ids.into_iter().zip(ratings).collect())
}

fn convert_column<T: TryFrom<u64>>(col: usize, cells: &[&str]) -> std::result::Result<Vec<T>, TableError> {
    match convert_all::<T>(cells) {
        Ok(values) => Ok(values),
        Err(_) => {
            debug!("{}列目の先頭セルを除外して再変換: {:?}", col, cells.first());
            convert_all::<T>(cells.get(1..).unwrap_or_default()).map_err(|cell| {
                TableError::NonNumericColumn {
                    column: col,
                    cell: cell.to_string(),
                }
            })
        }
    }
}

/// 全セルを整数に変換する。失敗したセルを返す
fn convert_all<'a, T: TryFrom<u64>>(cells: &[&'a str]) -> std::result::Result<Vec<T>, &'a str> {
    cells
        .iter()
        .map(|&cell| parse_integer_cell(cell).and_then(|v| T::try_from(v).ok()).ok_or(cell))
        .collect()
}

/// 「1,850」「1850.0」も整数として読む
fn parse_integer_cell(cell: &str) -> Option<u64> {
    let cleaned = cell.trim().replace(',', "");
    if let Ok(v) = cleaned.parse::<u64>() {
        return Some(v);
    }
    let f = cleaned.parse::<f64>().ok()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0).then(|| f as u64)
}
