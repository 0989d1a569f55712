//! # API アプリケーション構築
//!
//! ルーターとレイヤーの構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    routing::get,
};
use taskboard_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    client::SupabaseClient,
    handler::{
        KanbanState,
        delete_task,
        health_check,
        list_tasks,
        method_not_allowed,
        preflight,
        update_task,
        upsert_task,
    },
    middleware::cors_headers,
};

/// ルーターを構築する
///
/// `/api/kanban` の 1 ルートをメソッドでディスパッチし、
/// 対応外のメソッドは 405 フォールバックで受ける。
///
/// レイヤー順序（下に書いたものが外側）:
/// 1. `SetRequestIdLayer`（最外）: リクエスト受信時に UUID v7 を生成
/// 2. `TraceLayer`: カスタムスパンに request_id を含め、全ログに自動注入
/// 3. `PropagateRequestIdLayer`: レスポンスヘッダーに X-Request-Id をコピー
/// 4. `cors_headers`: 全レスポンス（405 フォールバック含む）に CORS ヘッダーを付与
pub fn build_app<C>(supabase: C) -> Router
where
    C: SupabaseClient + 'static,
{
    let state = Arc::new(KanbanState { supabase });

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/kanban",
            get(list_tasks)
                .post(upsert_task)
                .put(update_task)
                .delete(delete_task)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
        .layer(from_fn(cors_headers))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
