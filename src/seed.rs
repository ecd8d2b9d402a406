//! One-time population of an empty board with demonstration data.
//!
//! The fixture is an explicit value handed to [`seed`], not hidden state:
//! callers pass [`SeedFixture::demo`] or deserialize their own from JSON.
//! Seed tasks reference features by index into the fixture's feature list,
//! and the index is resolved to the real id assigned at insertion time —
//! fixtures never carry literal id strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{
    CreateFeatureInput, CreateTaskInput, FeatureStatus, KanbanColumn, TaskPriority,
};

/// A task row in a fixture. Mirrors [`CreateTaskInput`] except that the
/// feature link is an index into the fixture's feature list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee: String,
    /// Index of the linked feature within the fixture, if any.
    pub feature: Option<usize>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub column: KanbanColumn,
}

/// A complete board fixture: features first, then tasks referencing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFixture {
    pub features: Vec<CreateFeatureInput>,
    pub tasks: Vec<SeedTask>,
}

/// Result of a seed call, reported to the caller either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_count: Option<usize>,
}

/// Populate the board from the fixture if, and only if, both collections
/// are empty. Otherwise a no-op reporting "already seeded", which makes the
/// call safe to repeat on every cold start.
///
/// Feature rows go through [`Database::create_feature`], so their scores
/// are computed by the scoring formula rather than copied from the fixture.
pub fn seed(db: &Database, fixture: &SeedFixture) -> Result<SeedOutcome> {
    if db.count_features()? > 0 || db.count_tasks()? > 0 {
        return Ok(SeedOutcome {
            message: "already seeded".to_string(),
            features_count: None,
            tasks_count: None,
        });
    }

    let mut feature_ids = Vec::with_capacity(fixture.features.len());
    for input in &fixture.features {
        let feature = db.create_feature(input.clone())?;
        feature_ids.push(feature.id);
    }

    for task in &fixture.tasks {
        let feature_id = match task.feature {
            Some(index) => Some(*feature_ids.get(index).ok_or_else(|| {
                Error::Validation(format!(
                    "seed task '{}' references feature index {}, but the fixture has {} features",
                    task.title,
                    index,
                    feature_ids.len()
                ))
            })?),
            None => None,
        };

        db.create_task(CreateTaskInput {
            title: task.title.clone(),
            description: task.description.clone(),
            assignee: task.assignee.clone(),
            feature_id,
            priority: task.priority,
            due_date: task.due_date,
            column: task.column,
        })?;
    }

    Ok(SeedOutcome {
        message: "seeded".to_string(),
        features_count: Some(fixture.features.len()),
        tasks_count: Some(fixture.tasks.len()),
    })
}

impl SeedFixture {
    /// The demonstration dataset: a shared-inbox email product's backlog
    /// with seven features and seven tasks spread across the board.
    pub fn demo() -> Self {
        fn date(y: i32, m: u32, d: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
        }

        fn feature(
            title: &str,
            description: &str,
            impact: i64,
            effort: i64,
            confidence: i64,
            alignment: i64,
            status: FeatureStatus,
        ) -> CreateFeatureInput {
            CreateFeatureInput {
                title: title.to_string(),
                description: description.to_string(),
                impact,
                effort,
                confidence,
                alignment,
                status,
            }
        }

        fn task(
            title: &str,
            assignee: &str,
            feature: Option<usize>,
            priority: TaskPriority,
            due_date: Option<NaiveDate>,
            column: KanbanColumn,
        ) -> SeedTask {
            SeedTask {
                title: title.to_string(),
                description: String::new(),
                assignee: assignee.to_string(),
                feature,
                priority,
                due_date,
                column,
            }
        }

        Self {
            features: vec![
                feature(
                    "AI-powered email composer",
                    "Use LLMs to draft replies based on context",
                    5,
                    4,
                    4,
                    5,
                    FeatureStatus::InProgress,
                ),
                feature(
                    "Team inbox sharing",
                    "Allow multiple users to manage a shared inbox",
                    4,
                    3,
                    5,
                    4,
                    FeatureStatus::Prioritized,
                ),
                feature(
                    "Email scheduling",
                    "Schedule emails to be sent at a later time",
                    3,
                    2,
                    5,
                    3,
                    FeatureStatus::Backlog,
                ),
                feature(
                    "Analytics dashboard",
                    "Track open rates, response times, and team performance",
                    4,
                    5,
                    3,
                    4,
                    FeatureStatus::Backlog,
                ),
                feature(
                    "Mobile push notifications",
                    "Real-time alerts for priority emails",
                    3,
                    3,
                    4,
                    2,
                    FeatureStatus::Backlog,
                ),
                feature(
                    "Template library",
                    "Pre-built email templates for common scenarios",
                    4,
                    1,
                    5,
                    3,
                    FeatureStatus::Prioritized,
                ),
                feature(
                    "Two-factor authentication",
                    "Enhanced security for user accounts",
                    2,
                    2,
                    5,
                    5,
                    FeatureStatus::Released,
                ),
            ],
            tasks: vec![
                task(
                    "Design prompt engineering flow",
                    "Alex",
                    Some(0),
                    TaskPriority::High,
                    Some(date(2026, 3, 1)),
                    KanbanColumn::InProgress,
                ),
                task(
                    "Build LLM API integration",
                    "Jordan",
                    Some(0),
                    TaskPriority::High,
                    Some(date(2026, 3, 5)),
                    KanbanColumn::Todo,
                ),
                task(
                    "Shared inbox data model",
                    "Sam",
                    Some(1),
                    TaskPriority::Medium,
                    None,
                    KanbanColumn::InReview,
                ),
                task(
                    "Inbox permission controls",
                    "Taylor",
                    Some(1),
                    TaskPriority::Medium,
                    Some(date(2026, 3, 10)),
                    KanbanColumn::Todo,
                ),
                task(
                    "Template CRUD endpoints",
                    "Casey",
                    Some(5),
                    TaskPriority::Low,
                    None,
                    KanbanColumn::Backlog,
                ),
                task(
                    "Email send scheduling worker",
                    "Alex",
                    Some(2),
                    TaskPriority::Low,
                    None,
                    KanbanColumn::Backlog,
                ),
                task(
                    "Response editor UI polish",
                    "Jordan",
                    Some(0),
                    TaskPriority::High,
                    Some(date(2026, 2, 28)),
                    KanbanColumn::Done,
                ),
            ],
        }
    }
}
