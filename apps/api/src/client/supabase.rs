//! # Supabase クライアント
//!
//! `kanban_tasks` テーブルへの読み書きを PostgREST の
//! クエリパラメータ規約で行う。
//!
//! ## エンドポイント
//!
//! - `GET /rest/v1/kanban_tasks?order=created_at.desc` - 全件取得
//! - `POST /rest/v1/kanban_tasks?on_conflict=task_id` - upsert
//! - `PATCH /rest/v1/kanban_tasks?task_id=eq.{id}` - 部分更新
//! - `DELETE /rest/v1/kanban_tasks?task_id=eq.{id}` - 削除
//!
//! ## 認証
//!
//! すべての呼び出しに `apikey` ヘッダーと同じ値の Bearer トークンを付与する。
//! 書き込み系は RLS を迂回できる service role キーを優先し、
//! 未設定の場合は anon キーにフォールバックする。

use async_trait::async_trait;
use serde::Serialize;
use taskboard_domain::{Task, TaskPriority, TaskStatus};
use thiserror::Error;

/// `kanban_tasks` テーブルの PostgREST パス
const REST_PATH: &str = "/rest/v1/kanban_tasks";

/// Supabase クライアントエラー
///
/// 上流の失敗はステータスを問わず 1 種類として扱い、
/// レスポンスボディを固定プレフィックス付きでそのまま伝搬する。
/// リトライやフォールバックは行わない（呼び出し元の責務）。
#[derive(Debug, Clone, Error)]
pub enum SupabaseError {
    /// 上流が 2xx 以外を返した
    #[error("Supabase error: {body}")]
    Upstream { status: u16, body: String },

    /// ネットワークエラー（接続失敗、レスポンスの読み取り失敗）
    #[error("Supabase error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SupabaseError {
    fn from(err: reqwest::Error) -> Self {
        SupabaseError::Network(err.to_string())
    }
}

// --- 書き込みペイロード ---

/// upsert ペイロード
///
/// すべてのフィールドをデフォルト込みで常に送信する。
/// 同じ `task_id` の既存行がある場合、省略可能フィールドも
/// デフォルト値で上書きされる（create-or-replace セマンティクス）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUpsert {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub updated_at: String,
}

/// 部分更新ペイロード
///
/// 指定されたフィールドのみをシリアライズする。
/// 省略されたフィールドは上流で現状維持となるため、
/// `None` を `null` として送ってはならない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub updated_at: String,
}

// --- クライアントトレイト ---

/// Supabase クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
/// 各操作は上流が返した行の配列をそのまま返し、
/// 件数の解釈（404 / deleted 件数）はハンドラ側で行う。
#[async_trait]
pub trait SupabaseClient: Send + Sync {
    /// 全タスクを `created_at` 降順で取得する
    async fn list_tasks(&self) -> Result<Vec<Task>, SupabaseError>;

    /// タスクを upsert する（`task_id` 競合時はマージ）
    ///
    /// `return=representation` により作成・更新された行を返す。
    async fn upsert_task(&self, task: TaskUpsert) -> Result<Vec<Task>, SupabaseError>;

    /// `task_id` 一致行を部分更新する
    ///
    /// 一致する行がない場合は空の配列を返す。
    async fn update_task(&self, task_id: &str, patch: TaskPatch)
    -> Result<Vec<Task>, SupabaseError>;

    /// `task_id` 一致行を削除し、削除された行を返す
    async fn delete_task(&self, task_id: &str) -> Result<Vec<Task>, SupabaseError>;
}

/// Supabase クライアント実装
#[derive(Clone)]
pub struct SupabaseClientImpl {
    base_url: String,
    anon_key: String,
    service_role_key: Option<String>,
    client: reqwest::Client,
}

impl SupabaseClientImpl {
    /// 新しい SupabaseClient を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Supabase プロジェクトのベース URL（例: `https://xyz.supabase.co`）
    /// - `anon_key`: 読み取り用の anon キー
    /// - `service_role_key`: 書き込み用の service role キー（省略可）
    pub fn new(base_url: &str, anon_key: &str, service_role_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            service_role_key,
            client: reqwest::Client::new(),
        }
    }

    /// 書き込みに使用するキーを返す
    ///
    /// service role キーが設定されていればそちらを優先する。
    fn write_key(&self) -> &str {
        self.service_role_key.as_deref().unwrap_or(&self.anon_key)
    }
}

/// レスポンスの共通ハンドリング
///
/// 成功時はボディを行の配列にデシリアライズし、
/// 2xx 以外の場合はボディのテキストをそのまま `Upstream` エラーに畳み込む。
async fn read_rows(response: reqwest::Response) -> Result<Vec<Task>, SupabaseError> {
    let status = response.status();

    if status.is_success() {
        let rows = response.json::<Vec<Task>>().await?;
        return Ok(rows);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SupabaseError::Upstream {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SupabaseClient for SupabaseClientImpl {
    async fn list_tasks(&self) -> Result<Vec<Task>, SupabaseError> {
        let url = format!("{}{}?order=created_at.desc", self.base_url, REST_PATH);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        read_rows(response).await
    }

    async fn upsert_task(&self, task: TaskUpsert) -> Result<Vec<Task>, SupabaseError> {
        let url = format!("{}{}?on_conflict=task_id", self.base_url, REST_PATH);
        let key = self.write_key();

        let response = self
            .client
            .post(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&task)
            .send()
            .await?;

        read_rows(response).await
    }

    async fn update_task(
        &self,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<Vec<Task>, SupabaseError> {
        let url = format!(
            "{}{}?task_id=eq.{}",
            self.base_url,
            REST_PATH,
            urlencoding::encode(task_id)
        );
        let key = self.write_key();

        let response = self
            .client
            .patch(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;

        read_rows(response).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<Vec<Task>, SupabaseError> {
        let url = format!(
            "{}{}?task_id=eq.{}",
            self.base_url,
            REST_PATH,
            urlencoding::encode(task_id)
        );
        let key = self.write_key();

        let response = self
            .client
            .delete(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .header("Prefer", "return=representation")
            .send()
            .await?;

        read_rows(response).await
    }
}
