//! # API エラーハンドリング
//!
//! エンベロープ形式のレスポンスヘルパーと、
//! 上流エラーのレスポンス変換を集約する。
//!
//! CORS ヘッダーはミドルウェアが全レスポンスに付与するため、
//! ここでは触らない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskboard_shared::ApiResponse;

use crate::client::SupabaseError;

// --- レスポンスヘルパー ---

/// 200 成功レスポンス
pub fn success_response(data: serde_json::Value) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

/// 200 削除結果レスポンス
pub fn deleted_response(count: usize) -> Response {
    (StatusCode::OK, Json(ApiResponse::deleted(count))).into_response()
}

/// 400 バリデーションエラーレスポンス
pub fn bad_request_response(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))).into_response()
}

/// 404 Not Found レスポンス
pub fn not_found_response(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message))).into_response()
}

/// 405 Method Not Allowed レスポンス
pub fn method_not_allowed_response() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::error("Method not allowed")),
    )
        .into_response()
}

/// 500 内部エラーレスポンス
///
/// メッセージをそのままエンベロープに含める。
/// リクエスト処理はここで終端し、リトライは呼び出し元の責務。
pub fn internal_error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(message)),
    )
        .into_response()
}

/// Supabase エラーをログ付きで 500 レスポンスに変換する
///
/// 上流のエラーテキストは固定プレフィックス付きでそのまま伝搬する。
pub fn log_and_convert_supabase_error(context: &str, err: SupabaseError) -> Response {
    tracing::error!(
        error.category = "external_service",
        error.kind = "supabase",
        "{}で上流エラー: {}",
        context,
        err
    );
    internal_error_response(&err.to_string())
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use http::StatusCode;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn response_status_and_body(response: Response) -> (StatusCode, ApiResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let envelope: ApiResponse = serde_json::from_slice(&body).unwrap();
        (status, envelope)
    }

    #[tokio::test]
    async fn test_success_responseで200とエンベロープを返す() {
        let response = success_response(serde_json::json!({ "task_id": "TEST-1" }));
        let (status, envelope) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(
            envelope.data,
            Some(serde_json::json!({ "task_id": "TEST-1" }))
        );
    }

    #[tokio::test]
    async fn test_deleted_responseで件数を返す() {
        let response = deleted_response(2);
        let (status, envelope) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.deleted, Some(2));
    }

    #[tokio::test]
    async fn test_bad_request_responseで400を返す() {
        let response = bad_request_response("Invalid status");
        let (status, envelope) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.error.as_deref(), Some("Invalid status"));
    }

    #[tokio::test]
    async fn test_method_not_allowed_responseの文言が固定() {
        let response = method_not_allowed_response();
        let (status, envelope) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(envelope.error.as_deref(), Some("Method not allowed"));
    }

    #[tokio::test]
    async fn test_supabaseエラーが500とプレフィックス付き文言になる() {
        let err = SupabaseError::Upstream {
            status: 500,
            body: "Database error".to_string(),
        };
        let response = log_and_convert_supabase_error("テスト操作", err);
        let (status, envelope) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            envelope.error.as_deref(),
            Some("Supabase error: Database error")
        );
    }
}
