//! 分類送信フローの統合テスト
//!
//! 画像の準備からアップロード応答の正規化、推奨情報の解決までを
//! モックAPIで検証する

use async_trait::async_trait;
use plant_ai_rust::api::{ClassificationApi, ClassificationPage};
use plant_ai_rust::classify;
use plant_ai_rust::error::{PlantAiError, Result};
use plant_ai_common::RawClassification;
use serde_json::{json, Value};
use std::sync::Mutex;
use tempfile::tempdir;

/// 固定の分類結果を返すモックAPI
struct MockUploadApi {
    response: Value,
    fail: bool,
    uploads: Mutex<Vec<(usize, String)>>,
}

impl MockUploadApi {
    fn new(response: Value) -> Self {
        Self {
            response,
            fail: false,
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            response: Value::Null,
            fail: true,
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ClassificationApi for MockUploadApi {
    async fn fetch_page(&self, _page: u32, _limit: u32) -> Result<ClassificationPage> {
        Err(PlantAiError::Network("このモックは一覧非対応".into()))
    }

    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<RawClassification> {
        self.uploads
            .lock()
            .unwrap()
            .push((bytes.len(), file_name.to_string()));

        if self.fail {
            return Err(PlantAiError::Server {
                status: 500,
                message: "internal error".into(),
            });
        }
        Ok(RawClassification::new(self.response.clone()))
    }
}

fn sample_image_bytes() -> Vec<u8> {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("plant.png");
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(64, 48));
    img.save(&path).unwrap();
    classify::prepare_image(&path, 1280).unwrap()
}

/// 病気と判定された既知の種は推奨情報が引かれる
#[tokio::test]
async fn test_unhealthy_known_species_gets_recommendations() {
    let api = MockUploadApi::new(json!({
        "scientificName": "Dioscorea alata L.",
        "speciesConfidence": 0.91,
        "isHealthy": false
    }));

    let outcome = classify::submit(&api, sample_image_bytes()).await.unwrap();

    assert_eq!(outcome.record.species_confidence, Some(91));
    assert!(outcome.record.needs_recommendations());
    let entry = outcome.recommendations.expect("推奨情報が引けるはず");
    assert_eq!(entry.scientific_name, "Dioscorea alata");
}

/// 健康な植物では推奨情報を引かない
#[tokio::test]
async fn test_healthy_species_has_no_recommendations() {
    let api = MockUploadApi::new(json!({
        "scientificName": "Zea mays",
        "speciesConfidence": 0.95,
        "isHealthy": true
    }));

    let outcome = classify::submit(&api, sample_image_bytes()).await.unwrap();
    assert!(outcome.recommendations.is_none());
}

/// 病気でも未知の種なら推奨情報はNone（エラーにしない）
#[tokio::test]
async fn test_unhealthy_unknown_species_is_not_an_error() {
    let api = MockUploadApi::new(json!({
        "scientificName": "Rosa rubiginosa",
        "isHealthy": false
    }));

    let outcome = classify::submit(&api, sample_image_bytes()).await.unwrap();
    assert!(outcome.record.needs_recommendations());
    assert!(outcome.recommendations.is_none());
}

/// アップロード時のファイル名は固定値
#[tokio::test]
async fn test_upload_uses_fixed_file_name() {
    let api = MockUploadApi::new(json!({ "scientificName": "Zea mays" }));

    classify::submit(&api, sample_image_bytes()).await.unwrap();

    let uploads = api.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].1, classify::UPLOAD_FILE_NAME);
    assert!(uploads[0].0 > 0);
}

/// サーバーエラーはそのまま伝播する（自動再試行しない）
#[tokio::test]
async fn test_upload_failure_propagates() {
    let api = MockUploadApi::failing();

    let result = classify::submit(&api, sample_image_bytes()).await;
    match result {
        Err(PlantAiError::Server { status, .. }) => assert_eq!(status, 500),
        other => panic!("サーバーエラーを期待: {:?}", other.map(|o| o.record.id)),
    }

    // 1回しか呼ばれていない
    assert_eq!(api.uploads.lock().unwrap().len(), 1);
}
