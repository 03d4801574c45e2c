//! 分類送信フローモジュール
//!
//! 画像ファイルを読み込み、必要なら縮小してアップロードし、
//! 応答を履歴と同じ正規化レコードへ変換する。
//! 病気と判定された場合は学名マッチャーで推奨情報を引く。
//! 失敗時の自動再試行は行わない（呼び出し側が再実行する）。

use crate::api::ClassificationApi;
use crate::error::{PlantAiError, Result};
use plant_ai_common::{matcher, ClassificationRecord, RecommendationEntry};
use std::io::Cursor;
use std::path::Path;

/// アップロード時のファイル名（バックエンドの期待値）
pub const UPLOAD_FILE_NAME: &str = "plant_image.jpg";

/// 送信結果
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub record: ClassificationRecord,
    /// `is_healthy == false` のときだけ引かれる。一致なしは `None`
    pub recommendations: Option<&'static RecommendationEntry>,
}

/// 画像を読み込み、長辺が `max_size` を超えていれば縮小して
/// JPEGに再エンコードする
pub fn prepare_image(path: &Path, max_size: u32) -> Result<Vec<u8>> {
    let img = image::open(path)
        .map_err(|e| PlantAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let resized = if img.width().max(img.height()) > max_size {
        img.resize(max_size, max_size, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    // JPEGはアルファ非対応のためRGBへ落とす
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, image::ImageFormat::Jpeg)
        .map_err(|e| PlantAiError::ImageLoad(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// 画像バイト列を送信して正規化済みレコードを得る
pub async fn submit(api: &dyn ClassificationApi, bytes: Vec<u8>) -> Result<SubmissionOutcome> {
    let raw = api.upload_image(bytes, UPLOAD_FILE_NAME).await?;
    let record = ClassificationRecord::from_raw(&raw);

    let recommendations = if record.needs_recommendations() {
        record
            .scientific_name
            .as_deref()
            .and_then(matcher::find_recommendations)
    } else {
        None
    };

    Ok(SubmissionOutcome {
        record,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_image_missing_file() {
        let result = prepare_image(Path::new("/nonexistent/plant.jpg"), 1280);
        assert!(matches!(result, Err(PlantAiError::ImageLoad(_))));
    }

    #[test]
    fn test_prepare_image_not_an_image() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "not an image").unwrap();

        let result = prepare_image(&path, 1280);
        assert!(matches!(result, Err(PlantAiError::ImageLoad(_))));
    }

    #[test]
    fn test_prepare_image_downscales() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("large.png");

        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(200, 100));
        img.save(&path).unwrap();

        let bytes = prepare_image(&path, 50).unwrap();
        let reloaded = image::load_from_memory(&bytes).unwrap();
        assert!(reloaded.width() <= 50);
        assert!(reloaded.height() <= 50);
    }

    #[test]
    fn test_prepare_image_keeps_small_images() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("small.png");

        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(40, 30));
        img.save(&path).unwrap();

        let bytes = prepare_image(&path, 1280).unwrap();
        let reloaded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(reloaded.width(), 40);
        assert_eq!(reloaded.height(), 30);
    }
}
