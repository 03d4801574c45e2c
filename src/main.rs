use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use plant_ai_rust::{api, classify, cli, config, error, history, render, session};

use api::ApiClient;
use cli::{Cli, Commands};
use config::Config;
use error::{PlantAiError, Result};
use history::{FetchState, HistoryViewModel};
use session::{SessionTokens, TokenProvider};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    if cli.verbose {
        println!("API URL: {}", config.api_url);
        println!("設定ファイル: {}\n", Config::config_path()?.display());
    }

    match cli.command {
        Commands::History {
            page,
            limit,
            sort,
            details,
        } => {
            println!("🌱 plant-ai - 分類履歴\n");

            let api = build_client(&config)?;
            let limit = limit.unwrap_or(config.page_size);
            let view_model = HistoryViewModel::new(Arc::new(api), limit)?;

            let spinner = start_spinner("履歴を取得中...");
            // 総ページ数が未知の初回は1ページ目でクランプされるため、
            // まず1ページ目を取得してから指定ページへ移動する
            view_model.request_page(1).await?;
            if page > 1 {
                view_model.request_page(page).await?;
            }
            spinner.finish_and_clear();

            view_model.sort(sort).await;
            let state = view_model.snapshot().await;

            if let Some(id) = details {
                let record = view_model
                    .find_record(&id)
                    .await
                    .ok_or(PlantAiError::RecordNotFound(id))?;
                println!("{}", render::render_detail(&record));
                return Ok(());
            }

            println!("{}", render::render_list(&state));

            if let FetchState::Error { message, .. } = state.fetch {
                return Err(PlantAiError::Network(message));
            }
        }

        Commands::Classify { image, max_size } => {
            println!("🌱 plant-ai - 画像分類\n");

            let api = build_client(&config)?;
            let max_size = max_size.unwrap_or(config.max_image_size);

            println!("[1/2] 画像を準備中...");
            let bytes = classify::prepare_image(&image, max_size)?;
            println!("✔ {} ({} bytes)\n", image.display(), bytes.len());

            println!("[2/2] アップロードして分類中...");
            let spinner = start_spinner("サーバーの応答を待機中...");
            let outcome = classify::submit(&api, bytes).await?;
            spinner.finish_and_clear();
            println!("✔ 分類完了\n");

            println!("{}", render::render_detail(&outcome.record));

            if let Some(entry) = outcome.recommendations {
                println!("\n{}", render::render_recommendations(entry));
            } else if outcome.record.needs_recommendations() {
                println!("\nこの植物の病害推奨情報は登録されていません。");
            }

            println!("\n✅ 完了");
        }

        Commands::Recommend { name, json } => {
            // 一致なしは案内文を出して正常終了する（エラーにしない）
            println!("{}", render::render_recommend_lookup(&name, json)?);
        }

        Commands::Config {
            set_token,
            set_api_url,
            show,
        } => {
            let mut config = config;

            if set_token {
                let token = dialoguer::Password::new()
                    .with_prompt("認証トークン")
                    .interact()
                    .map_err(|e| PlantAiError::Config(e.to_string()))?;
                config.set_token(token)?;
                println!("✔ トークンを設定しました");
            }

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ API URLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  API URL: {}", config.api_url);
                println!("  ページサイズ: {}", config.page_size);
                println!("  最大画像サイズ: {}px", config.max_image_size);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  トークン: {}",
                    if config.token.is_some() {
                        "設定済み"
                    } else {
                        "未設定"
                    }
                );
            }
        }
    }

    Ok(())
}

/// トークンを解決してAPIクライアントを作る。トークンがなければ
/// ネットワークに触る前に失敗させる
fn build_client(config: &Config) -> Result<ApiClient> {
    let token = SessionTokens::from_config(config)
        .current_token()
        .ok_or(PlantAiError::MissingToken)?;
    ApiClient::new(config.api_url.clone(), token, config.timeout_seconds)
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
