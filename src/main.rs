use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;
use std::time::Duration;
use tt_rating_diff::{cli, config, error, locator, net, report, results};
use tt_rating_diff::common::{extract_tournament_number, join_records, parse_records, ResultsTable};
use cli::{Cli, Commands};
use config::Config;
use error::{RatingError, Result};
use net::{HttpFetcher, RetryPolicy};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::load()?;

    match cli.command {
        Commands::Parse { input } => {
            let text = read_input(&input)?;
            let records = parse_records(&text);
            if records.is_empty() {
                return Err(RatingError::MalformedInput);
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", report::render_records(&records));
            }
        }

        Commands::Locate { tournaments } => {
            for tournament in tournaments {
                let spinner = spinner(format!("第{}回のページを検索中...", tournament));
                let cfg = config.clone();
                let found = blocking(move || {
                    let fetcher = HttpFetcher::new(&cfg)?;
                    locator::Locator::new(&fetcher, RetryPolicy::default(), cfg.index_url.as_str())
                        .locate(tournament)
                })
                .await;
                spinner.finish_and_clear();

                println!("{}", report::render_located(tournament, &found));
            }
        }

        Commands::Results { tournament } => {
            let spinner = spinner(format!("第{}回の結果表を取得中...", tournament));
            let fetched = fetch_tournament(&config, tournament).await;
            spinner.finish_and_clear();
            let (url, table) = fetched?;

            if cli.json {
                let value = serde_json::json!({
                    "url": url,
                    "metadata": table.metadata,
                    "rows": table.rows,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("読み込み先 URL: {}", url);
                print!("{}", report::render_results(&table));
            }
        }

        Commands::Diff { input, tournament, csv } => {
            let text = read_input(&input)?;
            if text.trim().is_empty() {
                return Err(RatingError::MalformedInput);
            }

            let tournament = match tournament.or_else(|| extract_tournament_number(&text, &config.venue)) {
                Some(n) => n,
                None => return Err(RatingError::TournamentNumberNotFound(config.venue.clone())),
            };
            println!("✔ 検出された大会番号: 第{}回", tournament);

            let before = parse_records(&text);
            if before.is_empty() {
                return Err(RatingError::MalformedInput);
            }
            let missing = before.iter().filter(|r| r.name.is_none()).count();
            println!("✔ 抽出レコード数: {} 件 (名前欠損: {})", before.len(), missing);

            let spinner = spinner("結果表を取得中...".to_string());
            let fetched = fetch_tournament(&config, tournament).await;
            spinner.finish_and_clear();
            let (url, table) = fetched?;
            println!("✔ 読み込み先 URL: {}", url);

            let changes = join_records(&before, &table.rows);
            if cli.json {
                let value = serde_json::json!({
                    "tournament": tournament,
                    "url": url,
                    "metadata": table.metadata,
                    "changes": changes,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", report::render_changes(tournament, &changes));
            }

            if let Some(path) = csv {
                let path = if path.is_dir() {
                    path.join(report::csv_file_name(tournament))
                } else {
                    path
                };
                let file = File::create(&path)?;
                report::write_changes_csv(BufWriter::new(file), &changes)?;
                println!("✔ CSVを保存しました: {}", path.display());
            }
        }

        Commands::Batch { tournaments } => {
            println!("🚀 {}大会を並行取得します", tournaments.len());

            // 大会ごとに独立したクライアントで取得（共有状態なし）
            let handles: Vec<_> = tournaments
                .iter()
                .map(|&tournament| {
                    let cfg = config.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        let fetcher = HttpFetcher::new(&cfg)?;
                        results::load_tournament(&fetcher, RetryPolicy::default(), &cfg.index_url, tournament)
                    });
                    (tournament, handle)
                })
                .collect();

            for (tournament, handle) in handles {
                match handle.await {
                    Ok(Ok((url, table))) => println!(
                        "✔ 第{}回: {} 件 {} {}",
                        tournament,
                        table.rows.len(),
                        table.metadata.place,
                        url
                    ),
                    Ok(Err(e)) => println!("✖ 第{}回: {}", tournament, e),
                    Err(e) => println!("✖ 第{}回: タスク実行エラー: {}", tournament, e),
                }
            }
        }

        Commands::Config { set_index_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_index_url {
                config.set_index_url(url)?;
                println!("✔ 一覧ページURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  一覧ページ: {}", config.index_url);
                println!("  会場: {}", config.venue);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  User-Agent: {}", config.user_agent);
                println!("  リトライ: {}回 / {}秒間隔", net::MAX_ATTEMPTS, net::RETRY_DELAY.as_secs());
            }
        }
    }

    Ok(())
}

/// ファイルまたは標準入力（`-`）から読む
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// blocking HTTPはランタイムのワーカー外で実行する
async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RatingError::Task(e.to_string()))?
}

/// 開催回から結果表までを取得する
async fn fetch_tournament(config: &Config, tournament: u32) -> Result<(String, ResultsTable)> {
    let cfg = config.clone();
    blocking(move || {
        let fetcher = HttpFetcher::new(&cfg)?;
        results::load_tournament(&fetcher, RetryPolicy::default(), &cfg.index_url, tournament)
    })
    .await
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
