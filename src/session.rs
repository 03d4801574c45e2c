//! セッション管理モジュール
//!
//! 認証トークンの解決のみを担当する。ログイン・トークン発行は
//! 外部（認証バックエンド）の責務で、このコアは有効なトークン
//! 文字列を消費するだけ。

use crate::config::Config;

/// トークン設定用の環境変数名（設定ファイルより優先）
pub const TOKEN_ENV_VAR: &str = "PLANT_AI_TOKEN";

/// 現在のトークンを提供するコラボレータ
pub trait TokenProvider {
    /// 現在のトークン。セッションがなければ `None`
    fn current_token(&self) -> Option<String>;
}

/// 環境変数 → 設定ファイルの順でトークンを解決する
pub struct SessionTokens {
    config_token: Option<String>,
}

impl SessionTokens {
    pub fn from_config(config: &Config) -> Self {
        Self {
            config_token: config.token.clone(),
        }
    }
}

impl TokenProvider for SessionTokens {
    fn current_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        self.config_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_config() {
        let mut config = Config::default();
        config.token = Some("stored-token".into());
        let session = SessionTokens::from_config(&config);
        // 環境変数が未設定のとき設定ファイルの値が使われる
        // （環境変数が設定されたテスト環境ではそちらが優先される）
        let token = session.current_token();
        assert!(token.is_some());
    }

    #[test]
    fn test_no_token_is_none() {
        if std::env::var(TOKEN_ENV_VAR).is_ok() {
            return; // 環境変数があるときはこの検証は成立しない
        }
        let session = SessionTokens::from_config(&Config::default());
        assert_eq!(session.current_token(), None);
    }
}
