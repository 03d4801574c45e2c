//! 履歴ビューモデルモジュール
//!
//! ページ取得の状態遷移とレコードの正規化を担当する。
//!
//! ## 状態遷移
//! - `Idle → Loading`: `request_page(n)` 発行時
//! - `Loading → Loaded`: サーバー応答の反映時
//! - `Loading → Error`: 通信失敗・非2xx応答時（明示的な再試行で回復可能）
//!
//! `Loaded` かつ総件数0は描画時に空状態として扱う（取得状態としては
//! 分けない。空かどうかはサーバーの総件数で決まるため）。
//!
//! ## 順序保証
//! ページ切替が連続発行された場合は最後のリクエストが勝つ。
//! 単調増加のシーケンス番号を振り、最新でないリクエストの応答は
//! 解決時に破棄する（HTTPのキャンセルは行わない）。

use crate::api::ClassificationApi;
use crate::error::Result;
use plant_ai_common::{ClassificationRecord, PageState, RawClassification};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 取得状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded,
    /// エラーメッセージと再試行可能性を保持。既存のレコードは破棄しない
    Error { message: String, retryable: bool },
}

/// 現在ページのソート順（ロード済みページ内のみの並べ替え）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Confidence,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "confidence" => Ok(SortOrder::Confidence),
            _ => Err(format!(
                "Unknown sort order: {}. Use newest, oldest, or confidence",
                s
            )),
        }
    }
}

/// リクエストの結末
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 応答が状態へ反映された（成功・失敗どちらも含む）
    Applied,
    /// より新しいリクエストに追い越されたため破棄された
    Superseded,
}

/// ビューモデルのスナップショット
#[derive(Debug, Clone)]
pub struct HistoryState {
    pub page: PageState,
    pub fetch: FetchState,
    pub records: Vec<ClassificationRecord>,
}

/// 履歴ビューモデル
///
/// 共有可変状態はここに閉じる。明示的に構築して必要なビューへ
/// 注入する（グローバルには置かない）。
pub struct HistoryViewModel {
    api: Arc<dyn ClassificationApi>,
    state: Mutex<HistoryState>,
    sequence: AtomicU64,
}

impl HistoryViewModel {
    pub fn new(api: Arc<dyn ClassificationApi>, page_size: u32) -> plant_ai_common::Result<Self> {
        Ok(Self {
            api,
            state: Mutex::new(HistoryState {
                page: PageState::new(page_size)?,
                fetch: FetchState::Idle,
                records: Vec::new(),
            }),
            sequence: AtomicU64::new(0),
        })
    }

    /// 現在状態のスナップショットを返す
    pub async fn snapshot(&self) -> HistoryState {
        self.state.lock().await.clone()
    }

    /// 指定ページを取得する
    ///
    /// ページ番号は既知の総ページ数でクランプしてからサーバーへ送る。
    /// 取得失敗時はエラー状態になるが、既存のレコードは保持する
    /// （再試行が成功したときにだけ置き換わる）。
    pub async fn request_page(&self, page: u32) -> Result<RequestOutcome> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let (target, limit) = {
            let mut state = self.state.lock().await;
            let target = state.page.clamp(page);
            state.fetch = FetchState::Loading;
            (target, state.page.page_size())
        };

        let result = self.api.fetch_page(target, limit).await;

        let mut state = self.state.lock().await;
        if self.sequence.load(Ordering::SeqCst) != ticket {
            // 自分より新しいリクエストが発行済み。この応答は捨てる
            return Ok(RequestOutcome::Superseded);
        }

        match result {
            Ok(data) => {
                state.page.apply_totals(data.count, data.pages);
                state.page.set_current(target);
                state.records = data
                    .results
                    .iter()
                    .map(|value| {
                        ClassificationRecord::from_raw(&RawClassification::new(value.clone()))
                    })
                    .collect();
                state.fetch = FetchState::Loaded;
            }
            Err(error) => {
                state.fetch = FetchState::Error {
                    retryable: error.is_retryable(),
                    message: error.to_string(),
                };
            }
        }

        Ok(RequestOutcome::Applied)
    }

    /// 次ページへ。最終ページでは何もしない
    pub async fn next(&self) -> Result<Option<RequestOutcome>> {
        let target = self.state.lock().await.page.next_page();
        match target {
            Some(page) => Ok(Some(self.request_page(page).await?)),
            None => Ok(None),
        }
    }

    /// 前ページへ。先頭ページでは何もしない
    pub async fn previous(&self) -> Result<Option<RequestOutcome>> {
        let target = self.state.lock().await.page.previous_page();
        match target {
            Some(page) => Ok(Some(self.request_page(page).await?)),
            None => Ok(None),
        }
    }

    /// 現在ページを取り直す（エラー状態からの明示的な再試行）
    pub async fn retry(&self) -> Result<RequestOutcome> {
        let current = self.state.lock().await.page.current_page();
        self.request_page(current).await
    }

    /// ロード済みページ内のみを並べ替える（全ページ横断はしない）
    pub async fn sort(&self, order: SortOrder) {
        let mut state = self.state.lock().await;
        sort_records(&mut state.records, order);
    }

    /// IDでロード済みレコードを探す
    pub async fn find_record(&self, id: &str) -> Option<ClassificationRecord> {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .cloned()
    }
}

/// レコード列を並べ替える。日付・信頼度が欠落したレコードは末尾に回す
pub fn sort_records(records: &mut [ClassificationRecord], order: SortOrder) {
    use std::cmp::Ordering;

    match order {
        SortOrder::Newest => {
            records.sort_by(|a, b| match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        SortOrder::Oldest => {
            records.sort_by(|a, b| match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        SortOrder::Confidence => {
            records.sort_by(|a, b| match (a.species_confidence, b.species_confidence) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
    }
}
