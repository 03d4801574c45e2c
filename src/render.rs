//! 表示整形モジュール
//!
//! ビューモデルの状態をテキストへ整形する。状態は一切持たず、
//! 入力の `HistoryState` / `ClassificationRecord` から文字列を組み立てる
//! だけの純関数の集まり。ネットワークにもファイルにも触らない。

use crate::history::{FetchState, HistoryState};
use plant_ai_common::types::CANONICAL_KEYS;
use plant_ai_common::{
    ClassificationRecord, ConfidenceBand, PageItem, PageState, RecommendationEntry,
};
use serde_json::Value;

/// 分類日時が欠落しているときの表示文字列
pub const DATE_UNAVAILABLE: &str = "date unavailable";

/// 学名が取れなかったレコードの見出し
pub const UNKNOWN_PLANT: &str = "Unknown plant";

/// ページ番号ウィンドウの最大表示数
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// 分類日時を表示用に整形する。`None` は固定文字列で縮退する
pub fn format_date(created_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    match created_at {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

/// 信頼度バッジ（例: `87% (medium)`）。欠落は「不明」
pub fn confidence_badge(percent: Option<i64>) -> String {
    match percent {
        Some(p) => format!("{}% ({})", p, ConfidenceBand::from_percent(p)),
        None => "不明".to_string(),
    }
}

/// 健康状態の三値表示
fn health_label(is_healthy: Option<bool>) -> &'static str {
    match is_healthy {
        Some(true) => "健康",
        Some(false) => "病気",
        None => "不明",
    }
}

/// 履歴一覧の1件分のカード
pub fn render_card(index: usize, record: &ClassificationRecord) -> String {
    let name = record.scientific_name.as_deref().unwrap_or(UNKNOWN_PLANT);
    let mut lines = vec![format!(
        "{}. {} [{}]",
        index,
        name,
        confidence_badge(record.species_confidence)
    )];

    if let Some(common) = &record.common_name {
        lines.push(format!("   一般名: {}", common));
    }
    lines.push(format!("   日付: {}", format_date(record.created_at)));
    lines.push(format!("   状態: {}", health_label(record.is_healthy)));
    if record.needs_recommendations() {
        lines.push(format!(
            "   💡 推奨情報あり: plant-ai recommend \"{}\"",
            name
        ));
    }
    if let Some(id) = &record.id {
        lines.push(format!("   ID: {}", id));
    }

    lines.join("\n")
}

/// 履歴一覧全体を整形する
///
/// 取得状態に応じて分岐する:
/// - `Loading`: 進行中メッセージ
/// - `Error`: エラーメッセージと再試行の案内（直前のレコードがあれば残す）
/// - `Loaded` かつ0件: 空状態の案内
/// - `Loaded`: カード一覧 + ページネーション
pub fn render_list(state: &HistoryState) -> String {
    match &state.fetch {
        FetchState::Idle | FetchState::Loading => "履歴を読み込み中...".to_string(),
        FetchState::Error { message, retryable } => {
            let mut text = format!("⚠️  履歴の取得に失敗しました: {}", message);
            if *retryable {
                text.push_str("\n同じコマンドを再実行すると再試行できます。");
            }
            if !state.records.is_empty() {
                text.push_str("\n（直前に取得済みの内容を表示しています）\n\n");
                text.push_str(&render_cards(&state.records));
            }
            text
        }
        FetchState::Loaded => {
            if state.page.total_count() == 0 {
                return "まだ分類履歴がありません。`plant-ai classify <画像>` から始められます。"
                    .to_string();
            }
            let mut text = render_cards(&state.records);
            text.push('\n');
            text.push_str(&render_pagination(&state.page));
            text
        }
    }
}

fn render_cards(records: &[ClassificationRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| render_card(i + 1, record))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// ページネーション行（例: `21-25 / 25件  ページ: 1 … 8 9 [10] 11 12 … 20`）
pub fn render_pagination(page: &PageState) -> String {
    let range = match page.item_range() {
        Some((start, end)) => format!("{}-{} / {}件", start, end, page.total_count()),
        None => format!("0件 / {}件", page.total_count()),
    };

    let window: Vec<String> = page
        .page_window(MAX_VISIBLE_PAGES)
        .into_iter()
        .map(|item| match item {
            PageItem::Page { number, current } if current => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect();

    if window.is_empty() {
        range
    } else {
        format!("{}  ページ: {}", range, window.join(" "))
    }
}

/// 生JSONのキーを表示用ラベルへ変換する（`model_version` → `Model version`）
pub fn format_field_label(key: &str) -> String {
    match key {
        "id" | "_id" => return "ID".to_string(),
        "image_url" | "imageUrl" => return "Image URL".to_string(),
        _ => {}
    }

    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// 生JSONの値を表示用に整形する
///
/// - `null` → `N/A`
/// - 真偽値 → `yes` / `no`
/// - 0〜1の小数 → 百分率
/// - 配列 → 要素を整形してカンマ区切り
/// - オブジェクト → 整形済みJSON
pub fn format_field_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f > 0.0 && f < 1.0 => format!("{}%", (f * 100.0).round() as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_field_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// 1レコードの詳細表示
///
/// 主要情報（正規化済みフィールド）、技術情報（正規化で消費されなかった
/// 生JSONのキー）、生JSONの3セクションを出す。
pub fn render_detail(record: &ClassificationRecord) -> String {
    let mut lines = vec!["=== 主要情報 ===".to_string()];

    lines.push(format!(
        "学名: {}",
        record.scientific_name.as_deref().unwrap_or(UNKNOWN_PLANT)
    ));
    if let Some(common) = &record.common_name {
        lines.push(format!("一般名: {}", common));
    }
    lines.push(format!(
        "種の信頼度: {}",
        confidence_badge(record.species_confidence)
    ));
    if let Some(shape) = &record.shape {
        lines.push(format!(
            "形状: {} [{}]",
            shape,
            confidence_badge(record.shape_confidence)
        ));
    }
    lines.push(format!("健康状態: {}", health_label(record.is_healthy)));
    if let Some(image) = &record.image_ref {
        lines.push(format!("画像: {}", image));
    }
    lines.push(format!("分類日時: {}", format_date(record.created_at)));
    if let Some(id) = &record.id {
        lines.push(format!("ID: {}", id));
    }

    let technical = technical_fields(&record.raw);
    if !technical.is_empty() {
        lines.push(String::new());
        lines.push("=== 技術情報 ===".to_string());
        for (key, value) in technical {
            lines.push(format!(
                "{}: {}",
                format_field_label(&key),
                format_field_value(&value)
            ));
        }
    }

    if let Ok(pretty) = serde_json::to_string_pretty(&record.raw) {
        lines.push(String::new());
        lines.push("=== 生データ (JSON) ===".to_string());
        lines.push(pretty);
    }

    lines.join("\n")
}

/// 主要情報で消費されなかった生JSONのキーと値を返す
fn technical_fields(raw: &Value) -> Vec<(String, Value)> {
    let Some(object) = raw.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .filter(|(key, _)| !CANONICAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// 学名検索の結果を整形する
///
/// テーブルに一致がない場合はエラーではなく案内文を返す
/// （未登録の種は正常な結果であり、失敗ではない）。
pub fn render_recommend_lookup(name: &str, json: bool) -> crate::error::Result<String> {
    match plant_ai_common::find_recommendations(name) {
        Some(entry) if json => Ok(serde_json::to_string_pretty(entry)?),
        Some(entry) => Ok(render_recommendations(entry)),
        None => Ok(format!(
            "「{}」の病害推奨情報は登録されていません。",
            name
        )),
    }
}

/// 推奨情報の整形
pub fn render_recommendations(entry: &RecommendationEntry) -> String {
    let mut lines = vec![format!(
        "🌿 {} ({}) の病害と対処法",
        entry.scientific_name, entry.common_name
    )];

    for disease in entry.diseases {
        lines.push(String::new());
        lines.push(format!("■ {}", disease.name));
        if let Some(cause) = disease.cause {
            lines.push(format!("  原因: {}", cause));
        }
        if let Some(vector) = disease.vector {
            lines.push(format!("  媒介: {}", vector));
        }
        lines.push("  症状:".to_string());
        for symptom in disease.symptoms {
            lines.push(format!("    - {}", symptom));
        }
        lines.push("  対処:".to_string());
        for treatment in disease.treatments {
            lines.push(format!("    - {}", treatment));
        }
    }

    if !entry.general_practices.is_empty() {
        lines.push(String::new());
        lines.push("■ 一般的な管理".to_string());
        for practice in entry.general_practices {
            lines.push(format!("    - {}", practice));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_ai_common::{RawClassification, DISEASE_RECOMMENDATIONS};
    use serde_json::json;

    fn record(value: Value) -> ClassificationRecord {
        ClassificationRecord::from_raw(&RawClassification::new(value))
    }

    fn loaded_state(records: Vec<ClassificationRecord>, count: u64) -> HistoryState {
        let mut page = PageState::new(10).unwrap();
        page.apply_totals(count, None);
        HistoryState {
            page,
            fetch: FetchState::Loaded,
            records,
        }
    }

    #[test]
    fn test_missing_date_renders_placeholder() {
        // 欠落日時は現在時刻ではなく固定文字列になる
        assert_eq!(format_date(None), "date unavailable");

        let card = render_card(1, &record(json!({ "scientific_name": "Zea mays" })));
        assert!(card.contains("date unavailable"));
    }

    #[test]
    fn test_confidence_badge() {
        assert_eq!(confidence_badge(Some(95)), "95% (high)");
        assert_eq!(confidence_badge(Some(42)), "42% (very low)");
        assert_eq!(confidence_badge(None), "不明");
    }

    #[test]
    fn test_card_shows_recommend_hint_only_when_unhealthy() {
        let sick = render_card(
            1,
            &record(json!({ "scientific_name": "Zea mays", "isHealthy": false })),
        );
        assert!(sick.contains("recommend"));

        let healthy = render_card(
            1,
            &record(json!({ "scientific_name": "Zea mays", "isHealthy": true })),
        );
        assert!(!healthy.contains("recommend"));
    }

    #[test]
    fn test_empty_state_message() {
        let text = render_list(&loaded_state(Vec::new(), 0));
        assert!(text.contains("まだ分類履歴がありません"));
    }

    #[test]
    fn test_error_state_keeps_previous_records() {
        let mut state = loaded_state(vec![record(json!({ "scientific_name": "Zea mays" }))], 1);
        state.fetch = FetchState::Error {
            message: "接続がタイムアウトしました".into(),
            retryable: true,
        };

        let text = render_list(&state);
        assert!(text.contains("失敗"));
        assert!(text.contains("Zea mays"));
    }

    #[test]
    fn test_retry_hint_only_for_retryable_errors() {
        let mut state = loaded_state(Vec::new(), 0);

        state.fetch = FetchState::Error {
            message: "接続に失敗しました".into(),
            retryable: true,
        };
        assert!(render_list(&state).contains("再実行"));

        state.fetch = FetchState::Error {
            message: "APIレスポンスのパースに失敗".into(),
            retryable: false,
        };
        assert!(!render_list(&state).contains("再実行"));
    }

    #[test]
    fn test_recommend_lookup_miss_is_not_an_error() {
        // 未登録の種は案内文を返して正常終了する
        let text = render_recommend_lookup("Unknownus genus", false).unwrap();
        assert!(text.contains("登録されていません"));
        assert!(text.contains("Unknownus genus"));
    }

    #[test]
    fn test_recommend_lookup_hit() {
        let text = render_recommend_lookup("Zea mays", false).unwrap();
        assert!(text.contains("Gray leaf spot"));

        let json = render_recommend_lookup("Zea mays", true).unwrap();
        assert!(json.contains("\"scientific_name\": \"Zea mays\""));
    }

    #[test]
    fn test_pagination_marks_current_page() {
        let mut page = PageState::new(10).unwrap();
        page.apply_totals(25, None);
        page.set_current(3);

        let text = render_pagination(&page);
        assert!(text.contains("21-25 / 25件"));
        assert!(text.contains("[3]"));
    }

    #[test]
    fn test_field_label() {
        assert_eq!(format_field_label("model_version"), "Model version");
        assert_eq!(format_field_label("_id"), "ID");
        assert_eq!(format_field_label("image_url"), "Image URL");
    }

    #[test]
    fn test_field_value_formatting() {
        assert_eq!(format_field_value(&json!(null)), "N/A");
        assert_eq!(format_field_value(&json!(true)), "yes");
        assert_eq!(format_field_value(&json!(false)), "no");
        assert_eq!(format_field_value(&json!(0.87)), "87%");
        assert_eq!(format_field_value(&json!(12)), "12");
        assert_eq!(format_field_value(&json!(["a", "b"])), "a, b");
    }

    #[test]
    fn test_detail_splits_technical_fields() {
        let detail = render_detail(&record(json!({
            "scientific_name": "Dioscorea alata",
            "speciesConfidence": 0.91,
            "model_version": "v2",
        })));

        assert!(detail.contains("学名: Dioscorea alata"));
        assert!(detail.contains("Model version: v2"));
        assert!(detail.contains("生データ"));
        // 主要情報で消費済みのキーは技術情報に出ない
        assert!(!detail.contains("Scientific name:"));
    }

    #[test]
    fn test_render_recommendations() {
        let entry = &DISEASE_RECOMMENDATIONS[4];
        let text = render_recommendations(entry);
        assert!(text.contains("Zea mays"));
        assert!(text.contains("Gray leaf spot"));
        assert!(text.contains("一般的な管理"));
    }
}
