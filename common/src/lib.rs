//! 卓球レーティング 共通ライブラリ
//!
//! OCRテキストと結果表HTMLから参加者レコードを抽出する純粋関数群。
//! ネットワークI/Oは持たない（取得はCLI側の `net` が担当）。

pub mod types;
pub mod error;
pub mod classifier;
pub mod ocr;
pub mod links;
pub mod title;
pub mod table;
pub mod normalizer;
pub mod join;

pub use types::{ParticipantRecord, ResultRow, TitleMetadata, RatingChange};
pub use error::{Error, Result, TableError};
pub use classifier::{is_heading, is_name_candidate};
pub use ocr::{parse_records, extract_tournament_number, DEFAULT_VENUE};
pub use links::{find_tournament_link, find_frame_src};
pub use title::{parse_title, TitleVocabulary};
pub use table::{parse_results_html, ResultsTable};
pub use normalizer::normalize_member_id;
pub use join::join_records;
