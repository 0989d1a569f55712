//! # カンバンタスク
//!
//! ボード上の 1 枚のカードに対応するエンティティ。
//! `task_id` は外部から与えられる安定識別子で、upsert / 更新 / 削除のキーとなる。
//! `id` と `created_at` / `updated_at` はストレージバックエンドが管理する。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::DomainError;

/// タスクステータス
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    /// 保留（当面着手しない）
    Icebox,
    /// バックログ
    Backlog,
    /// 作業中
    InProgress,
    /// 完了
    Done,
    /// ブロック中
    Blocked,
}

impl std::str::FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "icebox" => Ok(Self::Icebox),
            "backlog" => Ok(Self::Backlog),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            _ => Err(DomainError::Validation(format!(
                "不正なタスクステータス: {}",
                s
            ))),
        }
    }
}

/// タスク優先度
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskPriority {
    /// 高
    High,
    /// 中
    Medium,
    /// 低
    Low,
}

impl std::str::FromStr for TaskPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(DomainError::Validation(format!("不正な優先度: {}", s))),
        }
    }
}

/// カンバンタスクエンティティ
///
/// バックエンドの `kanban_tasks` 行と 1:1 対応する。
/// タイムスタンプはバックエンドが返す文字列をそのまま保持し、
/// パースや再フォーマットは行わない（レスポンスの素通しを保証するため）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// ストレージが採番する不透明な識別子
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 外部から与えられる安定識別子（例: `INFRA-42`）
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// ハンドラにとって不透明なキーバリューマップ
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // ===== TaskStatus テスト =====

    #[rstest]
    #[case("icebox", TaskStatus::Icebox)]
    #[case("backlog", TaskStatus::Backlog)]
    #[case("in_progress", TaskStatus::InProgress)]
    #[case("done", TaskStatus::Done)]
    #[case("blocked", TaskStatus::Blocked)]
    fn test_statusの文字列をパースできる(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("todo")]
    #[case("IN_PROGRESS")]
    #[case("")]
    fn test_statusの不正な文字列でエラーになる(#[case] input: &str) {
        assert!(input.parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_statusのserializeがsnake_caseになる() {
        let json = serde_json::to_value(TaskStatus::InProgress).unwrap();
        assert_eq!(json, serde_json::json!("in_progress"));
    }

    #[test]
    fn test_statusのdisplayがsnake_caseになる() {
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(TaskStatus::Icebox.to_string(), "icebox");
    }

    // ===== TaskPriority テスト =====

    #[rstest]
    #[case("high", TaskPriority::High)]
    #[case("medium", TaskPriority::Medium)]
    #[case("low", TaskPriority::Low)]
    fn test_priorityの文字列をパースできる(#[case] input: &str, #[case] expected: TaskPriority) {
        assert_eq!(input.parse::<TaskPriority>().unwrap(), expected);
    }

    #[rstest]
    #[case("urgent")]
    #[case("HIGH")]
    #[case("")]
    fn test_priorityの不正な文字列でエラーになる(#[case] input: &str) {
        assert!(input.parse::<TaskPriority>().is_err());
    }

    // ===== Task テスト =====

    #[test]
    fn test_taskのdeserializeで省略フィールドがデフォルトになる() {
        let json = r#"{
            "task_id": "TEST-1",
            "title": "Test Task",
            "assignee": "Nova",
            "status": "backlog",
            "priority": "medium"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.task_id, "TEST-1");
        assert_eq!(task.description, "");
        assert!(task.metadata.is_empty());
        assert_eq!(task.id, None);
        assert_eq!(task.created_at, None);
    }

    #[test]
    fn test_taskのserialize_deserializeで行が保存される() {
        let json = serde_json::json!({
            "id": "7b0c",
            "task_id": "INFRA-42",
            "title": "Rotate credentials",
            "description": "quarterly rotation",
            "assignee": "Nova",
            "status": "in_progress",
            "priority": "high",
            "metadata": { "url": "https://example.com" },
            "created_at": "2024-01-01T00:00:00+00:00",
            "updated_at": "2024-01-02T00:00:00+00:00"
        });
        let task: Task = serde_json::from_value(json.clone()).unwrap();

        assert_eq!(serde_json::to_value(&task).unwrap(), json);
    }
}
