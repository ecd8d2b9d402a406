mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;
use crate::score::calc_score;

/// SQLite-backed store for features and tasks.
///
/// The connection is shared behind a mutex, making the store the single
/// writer for both collections: every operation runs as one statement under
/// the lock, so readers never observe a partially-applied mutation and
/// concurrent moves on the same task serialize.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "prioboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("prioboard.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> anyhow::Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Feature operations
    // ============================================================

    /// All features, most recently created first.
    pub fn get_all_features(&self) -> Result<Vec<Feature>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, impact, effort, confidence, alignment, status, score, created_at, updated_at
             FROM features ORDER BY created_at DESC, rowid DESC",
        )?;

        let features = stmt
            .query_map([], feature_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(features)
    }

    pub fn get_feature(&self, id: Uuid) -> Result<Option<Feature>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, impact, effort, confidence, alignment, status, score, created_at, updated_at
             FROM features WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(feature_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn create_feature(&self, input: CreateFeatureInput) -> Result<Feature> {
        validate_title(&input.title)?;
        validate_ratings(input.impact, input.effort, input.confidence, input.alignment)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let score = calc_score(input.impact, input.confidence, input.alignment, input.effort);

        conn.execute(
            "INSERT INTO features (id, title, description, impact, effort, confidence, alignment, status, score, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &input.description,
                input.impact,
                input.effort,
                input.confidence,
                input.alignment,
                input.status.as_str(),
                score,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Feature {
            id,
            title: input.title,
            description: input.description,
            impact: input.impact,
            effort: input.effort,
            confidence: input.confidence,
            alignment: input.alignment,
            status: input.status,
            score,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the supplied fields over the stored feature and persist.
    ///
    /// The score is recomputed from the merged ratings on every update, not
    /// only when a rating field was supplied, so it can never lag a partial
    /// update.
    pub fn update_feature(&self, id: Uuid, input: UpdateFeatureInput) -> Result<Feature> {
        let existing = self.get_feature(id)?.ok_or(Error::NotFound("feature"))?;

        let title = input.title.unwrap_or(existing.title);
        let description = input.description.unwrap_or(existing.description);
        let impact = input.impact.unwrap_or(existing.impact);
        let effort = input.effort.unwrap_or(existing.effort);
        let confidence = input.confidence.unwrap_or(existing.confidence);
        let alignment = input.alignment.unwrap_or(existing.alignment);
        let status = input.status.unwrap_or(existing.status);

        validate_title(&title)?;
        validate_ratings(impact, effort, confidence, alignment)?;
        let score = calc_score(impact, confidence, alignment, effort);

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "UPDATE features SET title = ?, description = ?, impact = ?, effort = ?, confidence = ?, alignment = ?, status = ?, score = ?, updated_at = ? WHERE id = ?",
            (
                &title,
                &description,
                impact,
                effort,
                confidence,
                alignment,
                status.as_str(),
                score,
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Feature {
            id,
            title,
            description,
            impact,
            effort,
            confidence,
            alignment,
            status,
            score,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a feature. Tasks pointing at it are left untouched; the
    /// reference is weak and never cascaded.
    pub fn delete_feature(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM features WHERE id = ?", [id.to_string()])?;
        if rows == 0 {
            return Err(Error::NotFound("feature"));
        }
        Ok(())
    }

    pub fn count_features(&self) -> Result<i64> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = conn.query_row("SELECT COUNT(*) FROM features", [], |row| row.get(0))?;
        Ok(count)
    }

    // ============================================================
    // Task operations
    // ============================================================

    /// All tasks, most recently created first.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, assignee, feature_id, priority, due_date, kanban_column, created_at
             FROM tasks ORDER BY created_at DESC, rowid DESC",
        )?;

        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Tasks linked to the given feature, most recently created first.
    pub fn get_tasks_by_feature(&self, feature_id: Uuid) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, assignee, feature_id, priority, due_date, kanban_column, created_at
             FROM tasks WHERE feature_id = ? ORDER BY created_at DESC, rowid DESC",
        )?;

        let tasks = stmt
            .query_map([feature_id.to_string()], task_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, description, assignee, feature_id, priority, due_date, kanban_column, created_at
             FROM tasks WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(task_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// Create a task. A supplied `feature_id` is stored as-is; existence
    /// against the feature collection is not re-checked here.
    pub fn create_task(&self, input: CreateTaskInput) -> Result<Task> {
        validate_title(&input.title)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO tasks (id, title, description, assignee, feature_id, priority, due_date, kanban_column, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.title,
                &input.description,
                &input.assignee,
                input.feature_id.map(|u| u.to_string()),
                input.priority.as_str(),
                input.due_date.map(|d| d.to_string()),
                input.column.as_str(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Task {
            id,
            title: input.title,
            description: input.description,
            assignee: input.assignee,
            feature_id: input.feature_id,
            priority: input.priority,
            due_date: input.due_date,
            column: input.column,
            created_at: now,
        })
    }

    pub fn update_task(&self, id: Uuid, input: UpdateTaskInput) -> Result<Task> {
        let existing = self.get_task(id)?.ok_or(Error::NotFound("task"))?;

        let title = input.title.unwrap_or(existing.title);
        let description = input.description.unwrap_or(existing.description);
        let assignee = input.assignee.unwrap_or(existing.assignee);
        let feature_id = input.feature_id.or(existing.feature_id);
        let priority = input.priority.unwrap_or(existing.priority);
        let due_date = input.due_date.or(existing.due_date);
        let column = input.column.unwrap_or(existing.column);

        validate_title(&title)?;

        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "UPDATE tasks SET title = ?, description = ?, assignee = ?, feature_id = ?, priority = ?, due_date = ?, kanban_column = ? WHERE id = ?",
            (
                &title,
                &description,
                &assignee,
                feature_id.map(|u| u.to_string()),
                priority.as_str(),
                due_date.map(|d| d.to_string()),
                column.as_str(),
                id.to_string(),
            ),
        )?;

        Ok(Task {
            id,
            title,
            description,
            assignee,
            feature_id,
            priority,
            due_date,
            column,
            created_at: existing.created_at,
        })
    }

    /// Move a task to another column. This is the drag-and-drop entry
    /// point: one UPDATE on the column alone, leaving every other field
    /// byte-for-byte unchanged. Any column may move to any other.
    pub fn move_task(&self, id: Uuid, column: KanbanColumn) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute(
            "UPDATE tasks SET kanban_column = ? WHERE id = ?",
            (column.as_str(), id.to_string()),
        )?;
        if rows == 0 {
            return Err(Error::NotFound("task"));
        }
        Ok(())
    }

    pub fn delete_task(&self, id: Uuid) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?", [id.to_string()])?;
        if rows == 0 {
            return Err(Error::NotFound("task"));
        }
        Ok(())
    }

    pub fn count_tasks(&self) -> Result<i64> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn feature_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Feature, rusqlite::Error> {
    Ok(Feature {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        impact: row.get(3)?,
        effort: row.get(4)?,
        confidence: row.get(5)?,
        alignment: row.get(6)?,
        status: FeatureStatus::from_str(&row.get::<_, String>(7)?)
            .unwrap_or(FeatureStatus::Backlog),
        score: row.get(8)?,
        created_at: parse_datetime(row.get::<_, String>(9)?),
        updated_at: parse_datetime(row.get::<_, String>(10)?),
    })
}

fn task_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<Task, rusqlite::Error> {
    Ok(Task {
        id: parse_uuid(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        assignee: row.get(3)?,
        feature_id: row.get::<_, Option<String>>(4)?.map(parse_uuid),
        priority: TaskPriority::from_str(&row.get::<_, String>(5)?).unwrap_or(TaskPriority::Medium),
        due_date: row.get::<_, Option<String>>(6)?.and_then(parse_date),
        column: KanbanColumn::from_str(&row.get::<_, String>(7)?).unwrap_or(KanbanColumn::Backlog),
        created_at: parse_datetime(row.get::<_, String>(8)?),
    })
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_ratings(impact: i64, effort: i64, confidence: i64, alignment: i64) -> Result<()> {
    for (name, value) in [
        ("impact", impact),
        ("effort", effort),
        ("confidence", confidence),
        ("alignment", alignment),
    ] {
        if !(1..=5).contains(&value) {
            return Err(Error::Validation(format!(
                "{name} must be between 1 and 5, got {value}"
            )));
        }
    }
    Ok(())
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_date(s: String) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}
