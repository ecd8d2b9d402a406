use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of execution work, tracked across the kanban board.
///
/// Tasks optionally point back at the feature they serve via `feature_id`.
/// The reference is weak: it is stored as a plain id, never enforced as a
/// foreign key, and deleting the feature leaves the task (and its dangling
/// id) in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Team member responsible for the task. Free text; the UI offers a
    /// roster but the store does not enforce it.
    pub assignee: String,
    /// Optional non-owning reference to the feature this task serves.
    pub feature_id: Option<Uuid>,
    pub priority: TaskPriority,
    /// Calendar date with no timezone semantics.
    pub due_date: Option<NaiveDate>,
    pub column: KanbanColumn,
    pub created_at: DateTime<Utc>,
}

/// Urgency of a task, independent of its board column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// The workflow stage of a task on the kanban board.
///
/// Any column may move to any other column — the board enforces no ordering
/// between stages, only that the target is one of the five known values.
/// The enum type carries that constraint at every boundary, so a move is a
/// plain assignment rather than a transition-table lookup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum KanbanColumn {
    Backlog,
    Todo,
    InProgress,
    InReview,
    Done,
}

impl KanbanColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::InReview => "in-review",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(Self::Backlog),
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "in-review" => Some(Self::InReview),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Input for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee: String,
    /// Accepted as supplied; existence against the feature collection is
    /// not re-checked here.
    pub feature_id: Option<Uuid>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub column: KanbanColumn,
}

/// Input for updating an existing task. All fields are optional for partial
/// updates; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub feature_id: Option<Uuid>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub column: Option<KanbanColumn>,
}

/// Input for the drag-and-drop move operation. Restricted to the column on
/// purpose: a move must not touch assignee, due date, or anything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTaskInput {
    pub column: KanbanColumn,
}
