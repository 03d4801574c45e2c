//! Plant AI Common Library
//!
//! CLIと他のUIターゲットで共有される型とドメインロジック:
//! - types: 生レコードの正規化と ClassificationRecord
//! - confidence: 信頼度の百分率統一
//! - matcher: 学名の曖昧照合
//! - recommendations: 静的な病害推奨テーブル
//! - pagination: 履歴一覧のページ状態

pub mod confidence;
pub mod error;
pub mod matcher;
pub mod pagination;
pub mod recommendations;
pub mod types;

pub use confidence::ConfidenceBand;
pub use error::{Error, Result};
pub use matcher::find_recommendations;
pub use pagination::{PageItem, PageState, DEFAULT_PAGE_SIZE};
pub use recommendations::{Disease, RecommendationEntry, DISEASE_RECOMMENDATIONS};
pub use types::{ClassificationRecord, RawClassification};
