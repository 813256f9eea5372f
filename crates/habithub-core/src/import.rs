//! JSON habit import.
//!
//! An import document is the JSON a user exported elsewhere: an object
//! with a `habits` array and an `actions` array. Actions are carried
//! through verbatim; only habits are interpreted. Imported habits
//! start over: whatever evaluation state the document carried is
//! discarded so the first evaluation after import anchors them fresh.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ImportError;
use crate::habit::{Habit, Period};

/// A parsed import document.
#[derive(Debug, Clone)]
pub struct HabitImport {
    pub habits: Vec<ImportedHabit>,
    /// Opaque action history from the source application.
    pub actions: Vec<Value>,
}

/// One habit entry as it appears in an import document. Everything
/// except the title is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedHabit {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub add_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub target_value: Option<u32>,
}

impl ImportedHabit {
    /// Materialize as a fresh habit. `fallback_id` is used when the
    /// entry carries no id, `imported_at` when it carries no addDate.
    pub fn into_habit(self, fallback_id: u64, imported_at: DateTime<Utc>) -> Habit {
        let mut habit = Habit::new(
            self.id.unwrap_or(fallback_id),
            self.title,
            self.category,
            self.period,
            self.add_date.unwrap_or(imported_at),
        );
        if let Some(target) = self.target_value {
            habit = habit.with_target(target);
        }
        habit
    }
}

/// Parse an import document.
///
/// # Errors
/// The document must be valid JSON and must contain both the `habits`
/// and `actions` arrays; each habit entry must at least decode to a
/// titled object.
pub fn parse_import(json: &str) -> Result<HabitImport, ImportError> {
    let doc: Value = serde_json::from_str(json)?;
    let habits = doc
        .get("habits")
        .and_then(Value::as_array)
        .ok_or_else(|| ImportError::MalformedDocument("missing 'habits' array".into()))?;
    let actions = doc
        .get("actions")
        .and_then(Value::as_array)
        .ok_or_else(|| ImportError::MalformedDocument("missing 'actions' array".into()))?;

    let mut parsed = Vec::with_capacity(habits.len());
    for (index, entry) in habits.iter().enumerate() {
        let habit: ImportedHabit = serde_json::from_value(entry.clone())
            .map_err(|e| ImportError::InvalidHabit(format!("entry {index}: {e}")))?;
        parsed.push(habit);
    }

    Ok(HabitImport {
        habits: parsed,
        actions: actions.clone(),
    })
}
