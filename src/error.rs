use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("認証トークンが設定されていません。`plant-ai config --set-token` で設定してください")]
    MissingToken,

    #[error("ネットワークエラー: {0}")]
    Network(String),

    #[error("リクエストがタイムアウトしました（{0}秒）。再実行してください")]
    Timeout(u64),

    #[error("サーバーエラー ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("レコードが見つかりません: {0}")]
    RecordNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] plant_ai_common::Error),
}

impl PlantAiError {
    /// このエラーが同じ操作の再実行で回復しうるか
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlantAiError::Network(_) | PlantAiError::Timeout(_) | PlantAiError::Server { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlantAiError>;
