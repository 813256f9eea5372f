use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change applied during an evaluation pass produces an
/// event. The CLI prints them; callers can use them to drive
/// notifications without diffing snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EvaluationEvent {
    /// A habit with no evaluation history had its first period
    /// boundary anchored. No rewards or penalties are applied.
    Anchored {
        habit_id: u64,
        period_end: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// A period elapsed without the habit being completed.
    Missed {
        habit_id: u64,
        period_end: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// A period elapsed with the habit completed on time.
    Rewarded {
        habit_id: u64,
        streak: u32,
        exp_gained: u32,
        coins_gained: u32,
        at: DateTime<Utc>,
    },
    LeveledUp {
        level: u32,
        at: DateTime<Utc>,
    },
}
