//! # API 設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//! 接続情報は起動時に一度だけ読み、プロセス内に保持する。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// Supabase プロジェクトのベース URL
    pub supabase_url: String,
    /// 読み取り用の anon キー（常に必要）
    pub supabase_anon_key: String,
    /// 書き込み用の service role キー（RLS を迂回する。省略可）
    ///
    /// 未設定の場合、書き込みは anon キーで行われ、
    /// RLS の制約を受ける。
    pub supabase_service_role_key: Option<String>,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "8788".to_string())
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            supabase_url: env::var("SUPABASE_URL").expect("SUPABASE_URL が設定されていません"),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                .expect("SUPABASE_ANON_KEY が設定されていません"),
            supabase_service_role_key: parse_optional_key(
                env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            ),
        })
    }
}

/// 省略可能なキーをパースする
///
/// 空文字は「未設定」として扱う（空の値で RLS 迂回が
/// 無効化されたつもりになる事故を防ぐ）。
fn parse_optional_key(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    // テスト間で環境変数の競合を避けるため、
    // パース関数単体で検証する

    use super::*;

    #[test]
    fn test_service_role_keyが設定されていれば保持する() {
        assert_eq!(
            parse_optional_key(Some("service-key".to_string())),
            Some("service-key".to_string())
        );
    }

    #[test]
    fn test_service_role_keyの空文字は未設定として扱う() {
        assert_eq!(parse_optional_key(Some(String::new())), None);
    }

    #[test]
    fn test_service_role_keyの未設定はnoneになる() {
        assert_eq!(parse_optional_key(None), None);
    }
}
