//! 学名マッチャーモジュール
//!
//! 予測モデルが返す自由記述の学名を、推奨テーブルの登録キーと照合する。
//! ルールは固定順で評価し、最初に一致したルールが勝つ。
//! 部分一致のスコアリングは行わない。
//!
//! ## 照合順序
//! 1. 正規化（トリム、末尾の括弧注記と命名者略記の除去、誤記修正）
//! 2. 登録キーとの完全一致（大文字小文字無視）
//! 3. 属+種（先頭2トークン）の一致
//! 4. 属・種それぞれの寛容一致（等しいか、一方が他方の部分文字列）

use crate::recommendations::{RecommendationEntry, DISEASE_RECOMMENDATIONS};
use lazy_static::lazy_static;
use regex::Regex;

/// 寛容一致で誤検出を避けるための属トークンの最小長
/// （"Zea" のような短い属名を部分一致させない）
const MIN_GENUS_LEN_FOR_PARTIAL: usize = 5;

lazy_static! {
    /// 末尾の括弧注記（信頼度表記など）: "Zea mays (87%)" → "Zea mays"
    static ref TRAILING_PAREN: Regex = Regex::new(r"\s*\([^)]*\)\s*$").unwrap();

    /// 末尾の命名者略記: "Dioscorea alata L." / "... Mill." / "... L.f."
    /// 1文字の略記はピリオド省略可、長い略記はピリオド必須。
    static ref AUTHORITY_SUFFIX: Regex =
        Regex::new(r"\s+[A-Z](?:[a-z]{0,4}\.|\.?)(?:\s*[A-Za-z][a-z]{0,4}\.)?\s*$").unwrap();

    /// 既知の誤記の修正テーブル（スペルチェッカではなく固定の置換リスト）
    static ref MISSPELLINGS: Vec<(Regex, &'static str)> = vec![
        // "Discorea"（iの欠落）→ "Dioscorea"
        (Regex::new(r"(?i)^discorea\s+").unwrap(), "Dioscorea "),
    ];
}

/// 学名を照合用に正規化する
///
/// トリム → 末尾の括弧注記を除去 → 末尾の命名者略記を除去 →
/// 誤記修正、の順で適用する。
pub fn normalize_name(name: &str) -> String {
    let mut normalized = name.trim().to_string();

    normalized = TRAILING_PAREN.replace(&normalized, "").trim().to_string();
    normalized = AUTHORITY_SUFFIX.replace(&normalized, "").trim().to_string();

    for (pattern, replacement) in MISSPELLINGS.iter() {
        normalized = pattern.replace(&normalized, *replacement).to_string();
    }

    normalized
}

/// 学名から推奨情報を検索する
///
/// どのルールにも一致しなければ `None` を返す。呼び出し側は
/// 「推奨情報なし」と表示する（エラーにしない）。
pub fn find_recommendations(name: &str) -> Option<&'static RecommendationEntry> {
    let normalized = normalize_name(name);
    if normalized.is_empty() {
        return None;
    }
    let lower = normalized.to_lowercase();

    // ルール1: 完全一致
    if let Some(entry) = DISEASE_RECOMMENDATIONS
        .iter()
        .find(|entry| entry.scientific_name.to_lowercase() == lower)
    {
        return Some(entry);
    }

    let input_tokens: Vec<&str> = lower.split_whitespace().collect();
    if input_tokens.len() < 2 {
        return None;
    }
    let input_genus = input_tokens[0];
    let input_species = input_tokens[1];

    // ルール2: 属+種（先頭2トークン）の一致
    for entry in DISEASE_RECOMMENDATIONS {
        let key_lower = entry.scientific_name.to_lowercase();
        let key_tokens: Vec<&str> = key_lower.split_whitespace().collect();
        if key_tokens.len() >= 2
            && key_tokens[0] == input_genus
            && key_tokens[1] == input_species
        {
            return Some(entry);
        }
    }

    // ルール3: 寛容一致（属・種とも、等しいか一方が他方を含む）
    for entry in DISEASE_RECOMMENDATIONS {
        let key_lower = entry.scientific_name.to_lowercase();
        let key_tokens: Vec<&str> = key_lower.split_whitespace().collect();
        if key_tokens.len() < 2 {
            continue;
        }
        let key_genus = key_tokens[0];
        let key_species = key_tokens[1];

        let genus_match = lenient_eq(key_genus, input_genus);
        let species_match = lenient_eq(key_species, input_species);
        let long_enough = key_genus.len() >= MIN_GENUS_LEN_FOR_PARTIAL
            && input_genus.len() >= MIN_GENUS_LEN_FOR_PARTIAL;

        if genus_match && species_match && long_enough {
            return Some(entry);
        }
    }

    None
}

fn lenient_eq(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}
