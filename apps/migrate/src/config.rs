//! # 移行スクリプトの設定
//!
//! 環境変数から移行元ファイルと移行先エンドポイントを読み込む。

use std::env;

/// 移行スクリプトの設定
#[derive(Debug, Clone)]
pub struct MigrateConfig {
    /// 移行元の kanban.json のパス
    pub kanban_json_path: String,
    /// 移行先の API エンドポイント
    pub api_endpoint: String,
}

impl MigrateConfig {
    /// 環境変数から設定を読み込む
    ///
    /// どちらも省略可能で、ローカル開発向けのデフォルトを持つ。
    pub fn from_env() -> Self {
        Self {
            kanban_json_path: env::var("KANBAN_JSON_PATH")
                .unwrap_or_else(|_| "kanban.json".to_string()),
            api_endpoint: env::var("KANBAN_API_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8788/api/kanban".to_string()),
        }
    }
}
