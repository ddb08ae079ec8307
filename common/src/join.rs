//! 大会前後レコードの突き合わせ
//!
//! 会員番号を正規化して外部結合し、増減を計算する。

use crate::normalizer::normalize_member_id;
use crate::types::{ParticipantRecord, RatingChange, ResultRow};
use std::collections::BTreeMap;

/// 大会前レコードと結果行を会員番号で外部結合する
///
/// - 正規化できない会員番号のレコードは捨てる
/// - 正規化後に同じ会員番号になるレコードは1件にまとめ、各側とも最初の出現を採る
///   （OCRの `12345678` と `2345678` は同一会員）
/// - 氏名が無い場合は空文字
/// - 増減は両方のレーティングがある場合のみ
/// - 会員番号の昇順
pub fn join_records(before: &[ParticipantRecord], after: &[ResultRow]) -> Vec<RatingChange> {
    let mut merged: BTreeMap<u64, RatingChange> = BTreeMap::new();

    for record in before {
        let Some(member_id) = normalize_member_id(&record.member_id) else {
            continue;
        };
        merged.entry(member_id).or_insert_with(|| RatingChange {
            member_id,
            name: record.name.clone().unwrap_or_default(),
            rating_before: record.rating_before,
            ..Default::default()
        });
    }

    for row in after {
        let Some(member_id) = normalize_member_id(&row.member_id.to_string()) else {
            continue;
        };
        let entry = merged.entry(member_id).or_insert_with(|| RatingChange {
            member_id,
            ..Default::default()
        });
        if entry.rating_after.is_none() {
            entry.rating_after = Some(row.rating_after);
        }
    }

    merged
        .into_values()
        .map(|mut change| {
            change.delta = match (change.rating_before, change.rating_after) {
                (Some(b), Some(a)) => Some(i64::from(a) - i64::from(b)),
                _ => None,
            };
            change
        })
        .collect()
}
