//! 表示用の整形とCSV出力

use crate::error::Result;
use std::io::Write;
use tt_rating_common::{ParticipantRecord, RatingChange, ResultsTable};

/// Excelで文字化けしないよう先頭に付けるBOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// 抽出レコードの一覧
pub fn render_records(records: &[ParticipantRecord]) -> String {
    let mut out = String::new();
    out.push_str("会員番号\t氏名\t大会前レーティング\n");
    for r in records {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            r.member_id,
            r.name.as_deref().unwrap_or(""),
            opt(r.rating_before)
        ));
    }
    let missing_names = records.iter().filter(|r| r.name.is_none()).count();
    out.push_str(&format!("抽出レコード数: {} 件 (名前欠損: {})\n", records.len(), missing_names));
    out
}

/// 結果表のメタデータと行
pub fn render_results(table: &ResultsTable) -> String {
    let meta = &table.metadata;
    let mut out = format!(
        "第{}回 {} {}\n",
        opt(meta.tournament_number),
        if meta.place.is_empty() { "(場所不明)" } else { meta.place.as_str() },
        opt(meta.date)
    );
    out.push_str("会員番号\t大会後レーティング\n");
    for row in &table.rows {
        out.push_str(&format!("{}\t{}\n", row.member_id, row.rating_after));
    }
    out.push_str(&format!("結果行数: {} 件\n", table.rows.len()));
    out
}

/// 増減の一覧
pub fn render_changes(tournament_number: u32, changes: &[RatingChange]) -> String {
    let mut out = format!("第{}回の増減結果\n", tournament_number);
    out.push_str("会員番号\t氏名\t大会前\t大会後\t増減\n");
    for c in changes {
        let delta = c
            .delta
            .map(|d| format!("{:+}", d))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            c.member_id,
            c.name,
            opt(c.rating_before),
            opt(c.rating_after),
            delta
        ));
    }
    out
}

/// 開催回ごとの検索結果の1行
pub fn render_located(tournament_number: u32, located: &Result<Option<String>>) -> String {
    match located {
        Ok(Some(url)) => format!("第{}回: {}", tournament_number, url),
        Ok(None) => format!("第{}回: 見つかりません", tournament_number),
        Err(e) => format!("✖ 第{}回: {}", tournament_number, e),
    }
}

/// 既定のCSVファイル名
pub fn csv_file_name(tournament_number: u32) -> String {
    format!("habikino_{}_zougen.csv", tournament_number)
}

/// 増減をBOM付きUTF-8のCSVで書き出す（欠損値は空欄）
pub fn write_changes_csv<W: Write>(mut writer: W, changes: &[RatingChange]) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["会員番号", "氏名", "大会前レーティング", "大会後レーティング", "増減"])?;
    for c in changes {
        out.write_record([
            c.member_id.to_string(),
            c.name.clone(),
            c.rating_before.map(|v| v.to_string()).unwrap_or_default(),
            c.rating_after.map(|v| v.to_string()).unwrap_or_default(),
            c.delta.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
