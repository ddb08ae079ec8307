use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tt-rating")]
#[command(about = "卓球レーティング大会の増減計算ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSONで出力
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCRテキストから参加者レコードを抽出
    Parse {
        /// OCRテキストファイル（`-` で標準入力）
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 開催回から結果表のURLを探す
    Locate {
        /// 開催回
        #[arg(required = true)]
        tournaments: Vec<u32>,
    },

    /// 結果表を取得して表示
    Results {
        /// 開催回
        #[arg(required = true)]
        tournament: u32,
    },

    /// OCRテキストと結果表を突き合わせて増減を表示
    Diff {
        /// OCRテキストファイル（`-` で標準入力）
        #[arg(required = true)]
        input: PathBuf,

        /// 開催回（省略時はテキスト中の「第N回…RS大会」から検出）
        #[arg(short, long)]
        tournament: Option<u32>,

        /// 増減をCSVに保存（ディレクトリ指定時は habikino_{回}_zougen.csv）
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },

    /// 複数の開催回の結果表を並行して取得
    Batch {
        /// 開催回
        #[arg(required = true)]
        tournaments: Vec<u32>,
    },

    /// 設定を表示/編集
    Config {
        /// 一覧ページのURLを設定
        #[arg(long)]
        set_index_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
