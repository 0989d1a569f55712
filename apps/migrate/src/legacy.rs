//! # 旧カンバンボードの変換
//!
//! 旧形式の kanban.json（セクション別の配列）を、API が受け付ける
//! フラットなタスク一覧に変換する。
//!
//! ## 変換ルール
//!
//! | セクション | status | description | 備考 |
//! |-----------|--------|-------------|------|
//! | `inProgress` | `in_progress` | `notes` | `url` を metadata に保持 |
//! | `upNext` | `backlog` | `notes` | |
//! | `blocked` | `blocked` | `blocker` | priority は `medium` 固定 |
//! | `doneToday` | `done` | 空文字 | `outcome` / `time` を metadata に保持 |
//!
//! タスク ID はタスク文言の先頭プレフィックス（例: `ARIA-42:`）から
//! 抽出し、なければセクションごとの連番を割り当てる。

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use taskboard_domain::{TaskPriority, TaskStatus};

/// タスク文言先頭の ID プレフィックス（例: `ARIA-42: `）
static TASK_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+-\d+):\s*").expect("タスク ID の正規表現が不正です")
});

/// ID 抽出に失敗した場合のデフォルト担当者
const DEFAULT_ASSIGNEE: &str = "Nova";

/// 旧形式のカンバンボード
///
/// すべてのセクションは省略可能（欠けたセクションは空として扱う）。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyBoard {
    #[serde(default, rename = "inProgress")]
    pub in_progress: Vec<LegacyTask>,
    #[serde(default, rename = "upNext")]
    pub up_next: Vec<LegacyTask>,
    #[serde(default)]
    pub blocked: Vec<LegacyTask>,
    #[serde(default, rename = "doneToday")]
    pub done_today: Vec<LegacyTask>,
}

/// 旧形式のタスク
///
/// セクションによって使われるフィールドが異なるため、
/// `task` 以外はすべて省略可能。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyTask {
    pub task: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub blocker: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// API に送信する移行済みタスク
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigratedTask {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub assignee: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub metadata: Map<String, Value>,
}

/// タスク文言から ID とタイトルを分離する
///
/// プレフィックスがなければ `fallback` を ID として使い、
/// 文言全体をタイトルとする。
fn split_task_text(text: &str, fallback: String) -> (String, String) {
    match TASK_ID_RE.captures(text) {
        Some(captures) => {
            let task_id = captures[1].to_string();
            let title = TASK_ID_RE.replace(text, "").into_owned();
            (task_id, title)
        }
        None => (fallback, text.to_string()),
    }
}

/// 旧形式の priority 文字列をパースする
///
/// 未設定・空文字・未知の値はすべて `medium` に倒す。
fn parse_priority(value: Option<&str>) -> TaskPriority {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(TaskPriority::Medium)
}

fn assignee_or_default(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => DEFAULT_ASSIGNEE.to_string(),
    }
}

/// ボード全体をフラットなタスク一覧に変換する
///
/// セクションの処理順は inProgress → upNext → blocked → doneToday。
pub fn collect_tasks(board: &LegacyBoard) -> Vec<MigratedTask> {
    let mut tasks = Vec::new();

    for (index, task) in board.in_progress.iter().enumerate() {
        let (task_id, title) = split_task_text(&task.task, format!("ACTIVE-{}", index + 1));
        let mut metadata = Map::new();
        if let Some(url) = &task.url {
            metadata.insert("url".to_string(), Value::String(url.clone()));
        }
        tasks.push(MigratedTask {
            task_id,
            title,
            description: task.notes.clone().unwrap_or_default(),
            assignee: assignee_or_default(task.assignee.as_deref()),
            status: TaskStatus::InProgress,
            priority: parse_priority(task.priority.as_deref()),
            metadata,
        });
    }

    for (index, task) in board.up_next.iter().enumerate() {
        let (task_id, title) = split_task_text(&task.task, format!("BACKLOG-{}", index + 1));
        tasks.push(MigratedTask {
            task_id,
            title,
            description: task.notes.clone().unwrap_or_default(),
            assignee: assignee_or_default(task.assignee.as_deref()),
            status: TaskStatus::Backlog,
            priority: parse_priority(task.priority.as_deref()),
            metadata: Map::new(),
        });
    }

    for (index, task) in board.blocked.iter().enumerate() {
        let (task_id, title) = split_task_text(&task.task, format!("BLOCKED-{}", index + 1));
        tasks.push(MigratedTask {
            task_id,
            title,
            description: task.blocker.clone().unwrap_or_default(),
            assignee: assignee_or_default(task.assignee.as_deref()),
            status: TaskStatus::Blocked,
            // ブロック中タスクの旧データは priority を持たない
            priority: TaskPriority::Medium,
            metadata: Map::new(),
        });
    }

    for (index, task) in board.done_today.iter().enumerate() {
        let (task_id, title) = split_task_text(&task.task, format!("DONE-{}", index + 1));
        let mut metadata = Map::new();
        if let Some(outcome) = &task.outcome {
            metadata.insert("outcome".to_string(), Value::String(outcome.clone()));
        }
        if let Some(time) = &task.time {
            metadata.insert("time".to_string(), Value::String(time.clone()));
        }
        tasks.push(MigratedTask {
            task_id,
            title,
            description: String::new(),
            // 完了タスクの旧データは担当者を記録していない
            assignee: DEFAULT_ASSIGNEE.to_string(),
            status: TaskStatus::Done,
            priority: TaskPriority::Medium,
            metadata,
        });
    }

    tasks
}
