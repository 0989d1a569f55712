//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式
//! `{ "success": bool, "data"?: ..., "error"?: string, "deleted"?: number }`
//! を提供する。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// すべての公開 API エンドポイントはこのエンベロープでレスポンスを返す。
/// この型は以下の場所で使用される:
/// - API ハンドラ（Serialize でクライアントにレスポンスを返す）
/// - 移行ツール（Deserialize で API のレスポンスを受け取る）
///
/// 未使用のフィールドはシリアライズ時に省略される。
///
/// ## 使用例
///
/// ```
/// use taskboard_shared::ApiResponse;
///
/// let response = ApiResponse::ok(serde_json::json!({ "task_id": "TEST-1" }));
/// assert!(response.success);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
}

impl ApiResponse {
    /// 成功レスポンスを作成する
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            deleted: None,
        }
    }

    /// 失敗レスポンスを作成する
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            deleted: None,
        }
    }

    /// 削除結果レスポンスを作成する
    pub fn deleted(count: usize) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            deleted: Some(count),
        }
    }
}
