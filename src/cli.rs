use crate::history::SortOrder;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-ai")]
#[command(about = "植物写真AI分類クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 分類履歴を表示
    History {
        /// 表示するページ番号
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// 1ページあたりの件数（省略時は設定ファイルの値）
        #[arg(short, long)]
        limit: Option<u32>,

        /// ソート順 (newest/oldest/confidence)
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,

        /// 指定IDのレコード詳細を表示
        #[arg(short, long)]
        details: Option<String>,
    },

    /// 植物写真を分類
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// アップロード前の縮小上限（長辺px、省略時は設定値）
        #[arg(long)]
        max_size: Option<u32>,
    },

    /// 学名から病害推奨情報を検索
    Recommend {
        /// 植物の学名（例: "Zea mays"）
        #[arg(required = true)]
        name: String,

        /// JSON形式で出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 認証トークンを設定（対話入力）
        #[arg(long)]
        set_token: bool,

        /// APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
