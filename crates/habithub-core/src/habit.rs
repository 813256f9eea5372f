//! Habit model types.
//!
//! Habits are owned by a [`crate::user::User`] and grouped into three
//! collections: `active` (evaluated every tick), `completed` (stopped,
//! kept for history), and `shared` (visible to friends). Snapshots use
//! camelCase field names so exported JSON matches the import format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence of a habit. Determines which period boundary the
/// evaluator checks the habit against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Parse a period string, falling back to `Daily` for anything
    /// unrecognized. Matching is case-insensitive.
    pub fn parse(s: &str) -> Period {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Period::Daily,
            "weekly" => Period::Weekly,
            "monthly" => Period::Monthly,
            _ => Period::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Daily
    }
}

// Lenient on purpose: imported documents carry arbitrary period
// strings and an unknown one must not reject the whole habit.
impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Period::parse(&s))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Completion state of a habit within its current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    Default,
    Completed,
    Overdue,
}

impl Default for HabitStatus {
    fn default() -> Self {
        HabitStatus::Default
    }
}

/// Whether a habit is a plain yes/no habit or tracks a numeric target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Boolean,
    Quantitative,
}

impl Default for HabitKind {
    fn default() -> Self {
        HabitKind::Boolean
    }
}

/// A single tracked habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: u64,
    pub title: String,
    /// Free-form grouping label shown in listings.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub period: Period,
    /// When the habit was added. The first period boundary is anchored
    /// from evaluation time, not from this instant.
    pub add_date: DateTime<Utc>,
    /// End of the most recently evaluated period. `None` until the
    /// first evaluation anchors it.
    #[serde(default)]
    pub last_period_end: Option<DateTime<Utc>>,
    /// Consecutive periods completed on time.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub status: HabitStatus,
    #[serde(rename = "type", default)]
    pub kind: HabitKind,
    /// Target count for quantitative habits, absent for boolean ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<u32>,
}

impl Habit {
    /// Create a fresh habit with no evaluation history.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        category: impl Into<String>,
        period: Period,
        added_at: DateTime<Utc>,
    ) -> Self {
        Habit {
            id,
            title: title.into(),
            category: category.into(),
            period,
            add_date: added_at,
            last_period_end: None,
            streak: 0,
            status: HabitStatus::Default,
            kind: HabitKind::Boolean,
            target_value: None,
        }
    }

    /// Attach a numeric target, turning the habit quantitative.
    pub fn with_target(mut self, target: u32) -> Self {
        self.kind = HabitKind::Quantitative;
        self.target_value = Some(target);
        self
    }
}

/// The three habit collections carried by a user snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitCollections {
    #[serde(default)]
    pub active: Vec<Habit>,
    #[serde(default)]
    pub completed: Vec<Habit>,
    #[serde(default)]
    pub shared: Vec<Habit>,
}

impl HabitCollections {
    /// Iterate over every habit in all three collections.
    pub fn all(&self) -> impl Iterator<Item = &Habit> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .chain(self.shared.iter())
    }

    /// Smallest id strictly greater than every existing habit id.
    /// Ids are never reused while the habit that held them exists,
    /// even across the active/completed split.
    pub fn next_id(&self) -> u64 {
        self.all().map(|h| h.id).max().map_or(1, |m| m + 1)
    }
}
