//! 信頼度正規化モジュール
//!
//! バックエンドは信頼度を 0〜1 の小数と 0〜100 の数値の
//! 両方の表現で返すため、ここで百分率（整数）に統一する。

/// 信頼度を百分率に正規化する
///
/// - `None` は `None` のまま返す（呼び出し側は「不明」と表示する。0に潰さない）
/// - 1.0 以下は小数表現とみなして100倍する
/// - それより大きい値は既に百分率とみなす
/// - 四捨五入のみ行い、範囲外の値もそのまま通す（クランプしない）
pub fn normalize(raw: Option<f64>) -> Option<i64> {
    let value = raw?;
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    Some(percent.round() as i64)
}

/// 信頼度の帯域（バッジの色分け用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// 90%以上
    High,
    /// 70%以上
    Medium,
    /// 50%以上
    Low,
    /// 50%未満
    VeryLow,
}

impl ConfidenceBand {
    /// 正規化済み百分率から帯域を決める
    pub fn from_percent(percent: i64) -> Self {
        if percent >= 90 {
            ConfidenceBand::High
        } else if percent >= 70 {
            ConfidenceBand::Medium
        } else if percent >= 50 {
            ConfidenceBand::Low
        } else {
            ConfidenceBand::VeryLow
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Medium => write!(f, "medium"),
            ConfidenceBand::Low => write!(f, "low"),
            ConfidenceBand::VeryLow => write!(f, "very low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fraction() {
        assert_eq!(normalize(Some(0.873)), Some(87));
        assert_eq!(normalize(Some(0.5)), Some(50));
        assert_eq!(normalize(Some(0.005)), Some(1));
        assert_eq!(normalize(Some(0.0)), Some(0));
    }

    #[test]
    fn test_normalize_percent() {
        assert_eq!(normalize(Some(87.0)), Some(87));
        assert_eq!(normalize(Some(87.4)), Some(87));
        assert_eq!(normalize(Some(87.5)), Some(88));
        assert_eq!(normalize(Some(100.0)), Some(100));
    }

    #[test]
    fn test_normalize_threshold() {
        // 1.0 ちょうどは小数表現として扱う
        assert_eq!(normalize(Some(1.0)), Some(100));
        assert_eq!(normalize(Some(1.1)), Some(1));
    }

    #[test]
    fn test_normalize_none() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_normalize_idempotent_above_threshold() {
        // 正規化済みの百分率をもう一度通しても変わらない
        let once = normalize(Some(0.873)).unwrap();
        assert_eq!(normalize(Some(once as f64)), Some(once));
    }

    #[test]
    fn test_normalize_out_of_range_passthrough() {
        // 範囲外はクランプせずそのまま通す（ソースの挙動を保存）
        assert_eq!(normalize(Some(150.0)), Some(150));
        assert_eq!(normalize(Some(-0.2)), Some(-20));
    }

    #[test]
    fn test_confidence_band() {
        assert_eq!(ConfidenceBand::from_percent(95), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(90), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(89), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(70), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(50), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_percent(49), ConfidenceBand::VeryLow);
    }
}
