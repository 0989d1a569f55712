//! # Taskboard ドメインモデル
//!
//! カンバンタスクのエンティティと列挙型を提供する。
//!
//! ## 設計方針
//!
//! - 永続化は外部の REST バックエンドに完全委譲するため、
//!   このクレートは型とバリデーションのみを持つ
//! - ビジネスロジック（upsert / 部分更新の組み立て）は API 側に配置

pub mod error;
pub mod task;

pub use error::DomainError;
pub use task::{Task, TaskPriority, TaskStatus};
