//! 分類APIクライアントモジュール
//!
//! 分類バックエンドとのHTTP通信を担当する。
//! - 一覧: `GET {base}/plant-classifier/classifications?page={n}&limit={m}`
//! - 送信: `POST {base}/plant-classifier/upload`（multipart、フィールド名 `image`）
//!
//! どちらもBearerトークンで認証する。履歴ビューモデルからは
//! `ClassificationApi` トレイト越しに使い、テストではモックに差し替える。

use crate::error::{PlantAiError, Result};
use async_trait::async_trait;
use plant_ai_common::RawClassification;
use serde::Deserialize;
use std::time::Duration;

/// 分類一覧エンドポイントの1ページ分の応答
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationPage {
    #[serde(default)]
    pub count: u64,
    /// サーバーが総ページ数を返さない場合もある
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// 分類バックエンドへのポート
#[async_trait]
pub trait ClassificationApi: Send + Sync {
    /// 指定ページの分類履歴を取得する
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ClassificationPage>;

    /// 画像をアップロードして分類結果（生レコード）を得る
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<RawClassification>;
}

/// reqwestベースの実クライアント
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    timeout_seconds: u64,
}

impl ApiClient {
    /// クライアントを作る。トークンは構築前に解決済みであること
    /// （トークン欠落は同期的に `MissingToken` として報告される）。
    pub fn new(base_url: String, token: String, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| PlantAiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout_seconds,
        })
    }

    fn request_error(&self, error: reqwest::Error) -> PlantAiError {
        if error.is_timeout() {
            PlantAiError::Timeout(self.timeout_seconds)
        } else {
            PlantAiError::Network(error.to_string())
        }
    }

    async fn error_from_status(response: reqwest::Response) -> PlantAiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            "サーバーがエラーを返しました".to_string()
        } else {
            body
        };
        PlantAiError::Server { status, message }
    }
}

#[async_trait]
impl ClassificationApi for ApiClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<ClassificationPage> {
        let url = format!("{}/plant-classifier/classifications", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        response
            .json::<ClassificationPage>()
            .await
            .map_err(|e| PlantAiError::ApiParse(e.to_string()))
    }

    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<RawClassification> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| PlantAiError::Network(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let url = format!("{}/plant-classifier/upload", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PlantAiError::ApiParse(e.to_string()))?;

        let classification = payload
            .get("classification")
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| {
                PlantAiError::ApiParse("応答に classification フィールドがありません".into())
            })?;

        Ok(RawClassification::new(classification))
    }
}
