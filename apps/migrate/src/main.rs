//! # Taskboard 移行スクリプト
//!
//! 旧形式の kanban.json を読み込み、タスクを 1 件ずつ API の
//! upsert エンドポイントへ送信する一回限りのバイナリ。
//!
//! upsert ベースのため再実行しても安全（同じ `task_id` は上書きされる）。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `KANBAN_JSON_PATH` | No | 移行元ファイル（デフォルト: `kanban.json`） |
//! | `KANBAN_API_ENDPOINT` | No | 移行先 API（デフォルト: `http://localhost:8788/api/kanban`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 実行方法
//!
//! ```bash
//! KANBAN_JSON_PATH=./kanban.json cargo run -p taskboard-migrate
//! ```

mod config;
mod legacy;

use anyhow::Context;
use config::MigrateConfig;
use legacy::{LegacyBoard, MigratedTask, collect_tasks};
use taskboard_shared::{ApiResponse, observability::TracingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("migrate");
    taskboard_shared::observability::init_tracing(tracing_config);

    let config = MigrateConfig::from_env();

    let raw = std::fs::read_to_string(&config.kanban_json_path)
        .with_context(|| format!("{} を読み込めませんでした", config.kanban_json_path))?;
    let board: LegacyBoard = serde_json::from_str(&raw)
        .with_context(|| format!("{} のパースに失敗しました", config.kanban_json_path))?;

    let tasks = collect_tasks(&board);
    tracing::info!("{} 件のタスクを移行します: {}", tasks.len(), config.api_endpoint);

    let client = reqwest::Client::new();
    let mut success_count = 0usize;
    let mut error_count = 0usize;

    for task in &tasks {
        match upsert(&client, &config.api_endpoint, task).await {
            Ok(()) => {
                tracing::info!("✓ {}: {}", task.task_id, truncate(&task.title, 50));
                success_count += 1;
            }
            Err(err) => {
                tracing::error!("✗ {}: {}", task.task_id, err);
                error_count += 1;
            }
        }
    }

    tracing::info!(
        "移行完了: success={} errors={}",
        success_count,
        error_count
    );

    Ok(())
}

/// タスク 1 件を upsert エンドポイントへ送信する
///
/// HTTP エラーだけでなく、エンベロープが `success: false` の
/// 場合もエラーとして扱う。
async fn upsert(
    client: &reqwest::Client,
    endpoint: &str,
    task: &MigratedTask,
) -> anyhow::Result<()> {
    let response = client.post(endpoint).json(task).send().await?;
    let envelope: ApiResponse = response.json().await?;

    if envelope.success {
        Ok(())
    } else {
        anyhow::bail!(
            "{}",
            envelope.error.unwrap_or_else(|| "不明なエラー".to_string())
        )
    }
}

/// ログ出力用にタイトルを切り詰める
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_短いタイトルはそのまま返す() {
        assert_eq!(truncate("short", 50), "short");
    }

    #[test]
    fn test_長いタイトルは省略記号付きで切り詰める() {
        let long = "a".repeat(60);

        let result = truncate(&long, 50);

        assert_eq!(result.chars().count(), 53);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_マルチバイト文字でも文字数で切り詰める() {
        let text = "あ".repeat(10);

        assert_eq!(truncate(&text, 10), text);
        assert_eq!(truncate(&text, 5), format!("{}...", "あ".repeat(5)));
    }
}
