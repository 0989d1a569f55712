//! # カンバンタスク API ハンドラ
//!
//! `/api/kanban` の 1 ルートをメソッドでディスパッチする。
//!
//! ## エンドポイント
//!
//! - `OPTIONS` - CORS プリフライト（204）
//! - `GET` - 全タスク取得（`created_at` 降順）
//! - `POST` - タスクの upsert（`task_id` 競合時はマージ）
//! - `PUT` - `task_id` 指定の部分更新
//! - `DELETE` - `task_id` クエリパラメータ指定の削除
//! - その他のメソッド - 405
//!
//! ハンドラはステートレスで、リクエストごとに上流を 1 回だけ呼ぶ。
//! 同一 `task_id` への並行書き込みの整合性は上流のトランザクション保証に委譲する。
//!
//! ## エラーメッセージ
//!
//! バリデーションメッセージの文言はダッシュボード UI が表示に使うため固定。

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::Utc;
use serde::Deserialize;
use taskboard_domain::{TaskPriority, TaskStatus};

use crate::{
    client::{SupabaseClient, TaskPatch, TaskUpsert},
    error::{
        bad_request_response,
        deleted_response,
        internal_error_response,
        log_and_convert_supabase_error,
        method_not_allowed_response,
        not_found_response,
        success_response,
    },
};

// --- バリデーションメッセージ ---

const MISSING_FIELDS_ERROR: &str =
    "Missing required fields: task_id, title, assignee, status, priority";
const INVALID_STATUS_DETAIL: &str =
    "Invalid status. Must be: icebox, backlog, in_progress, done, or blocked";
const INVALID_PRIORITY_DETAIL: &str = "Invalid priority. Must be: high, medium, or low";

// --- State ---

/// カンバンハンドラの State
///
/// 上流クライアントのみを保持する。プロセス内キャッシュや
/// 共有可変状態は持たない（任意個のレプリカで安全に動作する）。
pub struct KanbanState<C> {
    pub supabase: C,
}

// --- リクエスト型 ---

/// POST リクエストボディ
///
/// バリデーション前の生の形。必須フィールドの欠落・空文字を
/// ハンドラ側で検査するため、すべて `Option` で受ける。
#[derive(Debug, Deserialize)]
struct CreateTaskRequest {
    task_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// PUT リクエストボディ（部分更新）
#[derive(Debug, Deserialize)]
struct UpdateTaskRequest {
    task_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// DELETE クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    task_id: Option<String>,
}

/// 空文字を「未指定」として扱う
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Serialize 可能な値を JSON Value へ変換する
fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

// --- ハンドラ ---

/// OPTIONS /api/kanban
///
/// CORS プリフライト。ヘッダーはミドルウェアが付与するため、
/// ここでは 204 を返すだけでよい。上流は呼ばない。
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// 未対応メソッドのフォールバック
pub async fn method_not_allowed() -> Response {
    method_not_allowed_response()
}

/// GET /api/kanban
///
/// 全タスクを `created_at` 降順で取得し、そのまま返す。
pub async fn list_tasks<C>(State(state): State<Arc<KanbanState<C>>>) -> Response
where
    C: SupabaseClient,
{
    match state.supabase.list_tasks().await {
        Ok(tasks) => success_response(to_json(&tasks)),
        Err(e) => log_and_convert_supabase_error("タスク一覧取得", e),
    }
}

/// POST /api/kanban
///
/// タスクを作成または置換する。バリデーションは固定順
/// （必須フィールド → status → priority）で行い、最初の失敗で打ち切る。
/// 成功時は全フィールドをデフォルト込みで upsert するため、
/// 既存行の省略フィールドはデフォルト値で上書きされる。
pub async fn upsert_task<C>(State(state): State<Arc<KanbanState<C>>>, body: String) -> Response
where
    C: SupabaseClient,
{
    let request: CreateTaskRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return internal_error_response(&e.to_string()),
    };

    let Some(task_id) = non_empty(request.task_id) else {
        return bad_request_response(MISSING_FIELDS_ERROR);
    };
    let Some(title) = non_empty(request.title) else {
        return bad_request_response(MISSING_FIELDS_ERROR);
    };
    let Some(assignee) = non_empty(request.assignee) else {
        return bad_request_response(MISSING_FIELDS_ERROR);
    };
    let Some(raw_status) = non_empty(request.status) else {
        return bad_request_response(MISSING_FIELDS_ERROR);
    };
    let Some(raw_priority) = non_empty(request.priority) else {
        return bad_request_response(MISSING_FIELDS_ERROR);
    };

    let Ok(status) = raw_status.parse::<TaskStatus>() else {
        return bad_request_response(INVALID_STATUS_DETAIL);
    };
    let Ok(priority) = raw_priority.parse::<TaskPriority>() else {
        return bad_request_response(INVALID_PRIORITY_DETAIL);
    };

    let upsert = TaskUpsert {
        task_id,
        title,
        description: request.description.unwrap_or_default(),
        assignee,
        status,
        priority,
        metadata: request.metadata.unwrap_or_default(),
        updated_at: Utc::now().to_rfc3339(),
    };

    match state.supabase.upsert_task(upsert).await {
        Ok(rows) => {
            // return=representation は配列で返すため先頭要素を取り出す
            let data = rows
                .into_iter()
                .next()
                .map_or_else(|| serde_json::Value::Array(Vec::new()), |task| to_json(&task));
            success_response(data)
        }
        Err(e) => log_and_convert_supabase_error("タスク作成", e),
    }
}

/// PUT /api/kanban
///
/// `task_id` 指定の部分更新。指定されたフィールドのみをペイロードに含め、
/// 省略フィールドは上流で現状維持となる。`description` は空文字の指定も
/// 有効な更新として扱う。
pub async fn update_task<C>(State(state): State<Arc<KanbanState<C>>>, body: String) -> Response
where
    C: SupabaseClient,
{
    let request: UpdateTaskRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return internal_error_response(&e.to_string()),
    };

    let Some(task_id) = non_empty(request.task_id) else {
        return bad_request_response("task_id is required for updates");
    };

    let status = match non_empty(request.status) {
        Some(raw) => match raw.parse::<TaskStatus>() {
            Ok(status) => Some(status),
            Err(_) => return bad_request_response("Invalid status"),
        },
        None => None,
    };
    let priority = match non_empty(request.priority) {
        Some(raw) => match raw.parse::<TaskPriority>() {
            Ok(priority) => Some(priority),
            Err(_) => return bad_request_response("Invalid priority"),
        },
        None => None,
    };

    let patch = TaskPatch {
        title: non_empty(request.title),
        description: request.description,
        assignee: non_empty(request.assignee),
        status,
        priority,
        metadata: request.metadata,
        updated_at: Utc::now().to_rfc3339(),
    };

    match state.supabase.update_task(&task_id, patch).await {
        Ok(rows) => match rows.into_iter().next() {
            Some(task) => success_response(to_json(&task)),
            None => not_found_response("Task not found"),
        },
        Err(e) => log_and_convert_supabase_error("タスク更新", e),
    }
}

/// DELETE /api/kanban?task_id={id}
///
/// `task_id` 一致行を削除し、削除件数を返す。
pub async fn delete_task<C>(
    State(state): State<Arc<KanbanState<C>>>,
    Query(params): Query<DeleteParams>,
) -> Response
where
    C: SupabaseClient,
{
    let Some(task_id) = non_empty(params.task_id) else {
        return bad_request_response("task_id query parameter is required");
    };

    match state.supabase.delete_task(&task_id).await {
        Ok(rows) => deleted_response(rows.len()),
        Err(e) => log_and_convert_supabase_error("タスク削除", e),
    }
}
