use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate product capability, rated on four 1-5 dimensions.
///
/// Features compete for build time: each carries impact, effort, confidence,
/// and alignment ratings, and a derived `score` that ranks it against the
/// rest of the backlog. The score is never set directly — the store
/// recomputes it from the ratings on every create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Expected customer/business impact, 1-5.
    pub impact: i64,
    /// Estimated cost to build, 1-5. Higher effort lowers the score.
    pub effort: i64,
    /// How certain the team is about the other ratings, 1-5.
    pub confidence: i64,
    /// Fit with current product strategy, 1-5.
    pub alignment: i64,
    pub status: FeatureStatus,
    /// Derived priority score: `impact * confidence * alignment / effort`,
    /// rounded to one decimal. Higher means build sooner.
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a feature sits in the prioritization funnel.
///
/// - `Backlog`: captured, not yet committed
/// - `Prioritized`: selected for an upcoming cycle
/// - `InProgress`: actively being built
/// - `Released`: shipped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureStatus {
    Backlog,
    Prioritized,
    InProgress,
    Released,
}

impl FeatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Prioritized => "prioritized",
            Self::InProgress => "in-progress",
            Self::Released => "released",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "backlog" => Some(Self::Backlog),
            "prioritized" => Some(Self::Prioritized),
            "in-progress" => Some(Self::InProgress),
            "released" => Some(Self::Released),
            _ => None,
        }
    }
}

/// Input for creating a new feature. The score is computed, not supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeatureInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub impact: i64,
    pub effort: i64,
    pub confidence: i64,
    pub alignment: i64,
    pub status: FeatureStatus,
}

/// Input for updating an existing feature. All fields are optional for
/// partial updates; omitted fields keep their stored values. The score is
/// recomputed from the merged ratings regardless of which fields changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFeatureInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub impact: Option<i64>,
    pub effort: Option<i64>,
    pub confidence: Option<i64>,
    pub alignment: Option<i64>,
    pub status: Option<FeatureStatus>,
}
