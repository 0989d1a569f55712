//! # Taskboard API サーバー
//!
//! カンバンタスクの CRUD を上流の REST バックエンド（Supabase PostgREST）に
//! 中継する API サーバー。
//!
//! ## 役割
//!
//! - **入力バリデーション**: 必須フィールドと列挙値の検査
//! - **リクエスト中継**: 認証ヘッダー付きで上流に転送（リクエストごとに 1 回）
//! - **エンベロープ整形**: `{success, data|error}` 形式への正規化
//! - **CORS**: ダッシュボード UI からの直接呼び出しに対応
//!
//! ハンドラはステートレスで、任意個のレプリカで並行実行できる。
//! 同一 `task_id` への並行書き込みの整合性は上流に委譲する。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Dashboard   │────▶│  Taskboard   │────▶│   Supabase   │
//! │   (UI/CLI)   │     │     API      │     │  (PostgREST) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `8788`） |
//! | `SUPABASE_URL` | **Yes** | Supabase プロジェクトのベース URL |
//! | `SUPABASE_ANON_KEY` | **Yes** | 読み取り用 anon キー |
//! | `SUPABASE_SERVICE_ROLE_KEY` | No | 書き込み用 service role キー（RLS 迂回） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p taskboard-api
//!
//! # 本番環境（環境変数を直接指定）
//! SUPABASE_URL=https://... SUPABASE_ANON_KEY=... cargo run -p taskboard-api --release
//! ```

mod config;

use std::net::SocketAddr;

use config::ApiConfig;
use taskboard_api::{app_builder::build_app, client::SupabaseClientImpl};
use taskboard_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    taskboard_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);
    if config.supabase_service_role_key.is_none() {
        tracing::warn!("SUPABASE_SERVICE_ROLE_KEY が未設定のため、書き込みは anon キーで行われます");
    }

    // 上流クライアントの初期化
    let supabase = SupabaseClientImpl::new(
        &config.supabase_url,
        &config.supabase_anon_key,
        config.supabase_service_role_key.clone(),
    );

    // ルーター構築
    let app = build_app(supabase);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
