//! ドメインエラー型

use thiserror::Error;

/// ドメイン層のエラー
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// バリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
