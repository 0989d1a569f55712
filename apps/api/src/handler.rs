//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、永続化・順序付け・競合解決は上流バックエンドに委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `kanban`: カンバンタスクの CRUD（メソッドディスパッチ）

pub mod health;
pub mod kanban;

pub use health::health_check;
pub use kanban::{
    KanbanState,
    delete_task,
    list_tasks,
    method_not_allowed,
    preflight,
    update_task,
    upsert_task,
};
