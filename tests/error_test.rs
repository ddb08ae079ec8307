//! エラー型のテスト

use tt_rating_diff::error::RatingError;

/// Display実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        RatingError::Config("テスト設定エラー".to_string()),
        RatingError::MalformedInput,
        RatingError::TournamentNumberNotFound("羽曳野".to_string()),
        RatingError::LookupMiss { tournament: 294 },
        RatingError::Network {
            url: "https://example.com/".to_string(),
            attempts: 3,
            message: "HTTP 503".to_string(),
        },
        RatingError::NoTable { url: "https://example.com/".to_string() },
        RatingError::TableShape("列数不一致".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 見つからない場合とネットワーク失敗は区別される
#[test]
fn test_lookup_miss_vs_network() {
    let miss = format!("{}", RatingError::LookupMiss { tournament: 294 });
    assert!(miss.contains("第294回が見つかりません"));

    let network = format!(
        "{}",
        RatingError::Network {
            url: "https://example.com/".to_string(),
            attempts: 3,
            message: "timeout".to_string(),
        }
    );
    assert!(network.contains("3回"));
    assert!(network.contains("timeout"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: RatingError = io_err.into();

    assert!(matches!(err, RatingError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的）
#[test]
fn test_common_error_conversion() {
    let common_err = tt_rating_diff::common::Error::Parse("パースエラー".to_string());
    let err: RatingError = common_err.into();

    assert!(matches!(err, RatingError::Common(_)));
    assert!(format!("{}", err).contains("パースエラー"));
}
