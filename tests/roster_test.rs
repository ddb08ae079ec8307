//! 名簿OCRテキストのテスト
//!
//! 実際の貼り付けに近い、行の分かれ方が揃っていないテキストで検証

use tt_rating_diff::common::{extract_tournament_number, normalize_member_id, parse_records, DEFAULT_VENUE};

const ROSTER: &str = "\
第294回羽曳野RS大会 参加者
2024/5/12
会員番号 氏名 R
Aグループ
12345678 山田太郎1850
2234567
佐藤 花子
1720
3234567 鈴木一郎
1655
4234567
|---|
高橋
5234567 伊藤健 初
6234567 渡辺 1590 7234567 中村 1580
12345678 山田太郎1850
";

#[test]
fn test_roster_tournament_number() {
    assert_eq!(extract_tournament_number(ROSTER, DEFAULT_VENUE), Some(294));
}

#[test]
fn test_roster_records() {
    let records = parse_records(ROSTER);
    let ids: Vec<&str> = records.iter().map(|r| r.member_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["12345678", "2234567", "3234567", "4234567", "5234567", "6234567", "7234567"]
    );

    let by_id = |id: &str| records.iter().find(|r| r.member_id == id).unwrap();

    assert_eq!(by_id("12345678").name.as_deref(), Some("山田太郎"));
    assert_eq!(by_id("12345678").rating_before, Some(1850));

    // 会員番号だけの行 → 後続行から氏名とレーティング
    assert_eq!(by_id("2234567").name.as_deref(), Some("佐藤 花子"));
    assert_eq!(by_id("2234567").rating_before, Some(1720));

    // 同じ行に氏名、次の行にレーティング
    assert_eq!(by_id("3234567").name.as_deref(), Some("鈴木一郎"));
    assert_eq!(by_id("3234567").rating_before, Some(1655));

    // 罫線行を飛ばして氏名
    assert_eq!(by_id("4234567").name.as_deref(), Some("高橋"));

    // 初参加はレーティングなし
    assert_eq!(by_id("5234567").name.as_deref(), Some("伊藤健 初"));
    assert_eq!(by_id("5234567").rating_before, None);

    assert_eq!(by_id("6234567").rating_before, Some(1590));
    assert_eq!(by_id("7234567").name.as_deref(), Some("中村"));
    assert_eq!(by_id("7234567").rating_before, Some(1580));
}

#[test]
fn test_roster_unique_ids() {
    let records = parse_records(ROSTER);
    let mut ids: Vec<&str> = records.iter().map(|r| r.member_id.as_str()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[test]
fn test_roster_normalized_ids() {
    let records = parse_records(ROSTER);
    let normalized: Vec<Option<u64>> = records.iter().map(|r| normalize_member_id(&r.member_id)).collect();
    assert_eq!(normalized[0], Some(2345678));
    assert_eq!(normalized[1], Some(2234567));
}
