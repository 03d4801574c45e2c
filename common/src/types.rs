//! 分類レコードの型定義
//!
//! サーバーが返す生JSONはフィールド名の揺れ（`scientific_name` /
//! `species` など）と信頼度の単位の揺れを含むため、この境界で一度だけ
//! 正規の `ClassificationRecord` へ変換する。曖昧さをここより先へ漏らさない。

use crate::confidence;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// 学名の候補キー（優先順）
const SCIENTIFIC_NAME_KEYS: &[&str] = &[
    "scientificName",
    "scientific_name",
    "species",
    "plant_name",
    "name",
];

/// 一般名の候補キー（優先順）
const COMMON_NAME_KEYS: &[&str] = &["commonName", "common_name", "plant_name", "name"];

/// 種の信頼度の候補キー（優先順）
const SPECIES_CONFIDENCE_KEYS: &[&str] = &[
    "speciesConfidence",
    "species_confidence",
    "confidence",
    "score",
];

/// 形状の信頼度の候補キー（優先順）
const SHAPE_CONFIDENCE_KEYS: &[&str] = &["shapeConfidence", "shape_confidence"];

/// 健康状態の候補キー（優先順）
const IS_HEALTHY_KEYS: &[&str] = &["isHealthy", "is_healthy", "healthy"];

/// 画像参照の候補キー（優先順）
const IMAGE_KEYS: &[&str] = &["imageUrl", "image_url", "imagePath", "image"];

/// 分類日時の候補キー（優先順）
const CREATED_AT_KEYS: &[&str] = &["created_at", "createdAt", "timestamp"];

/// IDの候補キー（優先順）
const ID_KEYS: &[&str] = &["id", "_id"];

/// 正規化で消費される全候補キー
///
/// 詳細表示の「技術情報」は、生JSONのうちここに載らないキーだけを
/// 並べる（主要情報との二重表示を避ける）。
pub const CANONICAL_KEYS: &[&str] = &[
    "scientificName",
    "scientific_name",
    "species",
    "plant_name",
    "name",
    "commonName",
    "common_name",
    "speciesConfidence",
    "species_confidence",
    "confidence",
    "score",
    "shape",
    "shapeConfidence",
    "shape_confidence",
    "isHealthy",
    "is_healthy",
    "healthy",
    "imageUrl",
    "image_url",
    "imagePath",
    "image",
    "created_at",
    "createdAt",
    "timestamp",
    "id",
    "_id",
];

/// サーバー応答の生レコード
///
/// 論理フィールドごとに候補キーを順に試し、最初に見つかった
/// 非nullの値を採用する。
#[derive(Debug, Clone)]
pub struct RawClassification(Value);

impl RawClassification {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 元のJSON値への参照（詳細表示用）
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn first_value(&self, keys: &[&str]) -> Option<&Value> {
        let object = self.0.as_object()?;
        keys.iter()
            .find_map(|key| object.get(*key).filter(|v| !v.is_null()))
    }

    fn string_field(&self, keys: &[&str]) -> Option<String> {
        match self.first_value(keys)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn number_field(&self, keys: &[&str]) -> Option<f64> {
        self.first_value(keys)?.as_f64()
    }

    fn bool_field(&self, keys: &[&str]) -> Option<bool> {
        self.first_value(keys)?.as_bool()
    }

    pub fn id(&self) -> Option<String> {
        self.string_field(ID_KEYS)
    }

    pub fn scientific_name(&self) -> Option<String> {
        self.string_field(SCIENTIFIC_NAME_KEYS)
    }

    pub fn common_name(&self) -> Option<String> {
        self.string_field(COMMON_NAME_KEYS)
    }

    pub fn species_confidence(&self) -> Option<f64> {
        self.number_field(SPECIES_CONFIDENCE_KEYS)
    }

    pub fn shape(&self) -> Option<String> {
        self.string_field(&["shape"])
    }

    pub fn shape_confidence(&self) -> Option<f64> {
        self.number_field(SHAPE_CONFIDENCE_KEYS)
    }

    pub fn is_healthy(&self) -> Option<bool> {
        self.bool_field(IS_HEALTHY_KEYS)
    }

    pub fn image_ref(&self) -> Option<String> {
        self.string_field(IMAGE_KEYS)
    }

    /// 分類日時。欠落・解釈不能なら `None`（現在時刻で埋めない）
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self.first_value(CREATED_AT_KEYS)? {
            Value::String(s) => parse_timestamp(s),
            Value::Number(n) => {
                let epoch = n.as_i64()?;
                from_epoch(epoch)
            }
            _ => None,
        }
    }
}

/// 正規化済み分類レコード
///
/// 信頼度は百分率に統一済み。欠落フィールドは `None` のまま保持し、
/// 表示側でフィールド単位に縮退する（レコード全体を失敗させない）。
#[derive(Debug, Clone)]
pub struct ClassificationRecord {
    pub id: Option<String>,
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    /// 百分率に正規化済みの種信頼度
    pub species_confidence: Option<i64>,
    pub shape: Option<String>,
    /// 百分率に正規化済みの形状信頼度
    pub shape_confidence: Option<i64>,
    /// 三値: 健康 / 病気 / 不明（フィールド欠落）
    pub is_healthy: Option<bool>,
    pub image_ref: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// 元のJSON（詳細表示・デバッグコピー用）
    pub raw: Value,
}

impl ClassificationRecord {
    /// 生レコードから正規化レコードを作る
    pub fn from_raw(raw: &RawClassification) -> Self {
        Self {
            id: raw.id(),
            scientific_name: raw.scientific_name(),
            common_name: raw.common_name(),
            species_confidence: confidence::normalize(raw.species_confidence()),
            shape: raw.shape(),
            shape_confidence: confidence::normalize(raw.shape_confidence()),
            is_healthy: raw.is_healthy(),
            image_ref: raw.image_ref(),
            created_at: raw.created_at(),
            raw: raw.as_value().clone(),
        }
    }

    /// 病気と判定されたレコードのみ推奨情報ボタンを出す
    pub fn needs_recommendations(&self) -> bool {
        self.is_healthy == Some(false)
    }
}

/// 文字列タイムスタンプを解釈する（RFC3339を優先、次に素朴な形式）
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// エポック秒またはミリ秒を解釈する
fn from_epoch(epoch: i64) -> Option<DateTime<Utc>> {
    // 10^12 以上はミリ秒とみなす
    if epoch.abs() >= 1_000_000_000_000 {
        DateTime::from_timestamp_millis(epoch)
    } else {
        DateTime::from_timestamp(epoch, 0)
    }
}
