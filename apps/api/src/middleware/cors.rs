//! # CORS ヘッダーミドルウェア
//!
//! ブラウザのダッシュボードから直接呼び出されるため、
//! 固定の CORS ヘッダーセットを全レスポンスに設定する。
//! エラーレスポンスや 405 フォールバックも例外なく対象となる。

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// 固定の CORS ヘッダーセットを全レスポンスに付与する
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
