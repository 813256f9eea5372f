//! User snapshot model.
//!
//! A [`User`] is the full point-in-time state of one account: vitals
//! (hp, level, exp, coins), the habit collections, achievements, and
//! the friend list. The whole struct is what gets persisted as the
//! account snapshot and what the evaluator transforms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::HabitCollections;

/// Hit points a fresh account starts with.
pub const DEFAULT_HP: i32 = 5;
/// Level a fresh account starts at.
pub const DEFAULT_LEVEL: u32 = 1;

/// Full state of one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Hit points. Each missed period costs one; clamped at zero.
    pub hp: i32,
    pub level: u32,
    /// Experience toward the next level, resets on level-up.
    pub exp: u32,
    pub chocopie_coins: u32,
    #[serde(default)]
    pub habits: HabitCollections,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub friends: Vec<Friend>,
}

impl User {
    /// Fresh account state for a newly registered email.
    pub fn new(email: impl Into<String>) -> Self {
        User {
            email: email.into(),
            username: None,
            avatar: None,
            hp: DEFAULT_HP,
            level: DEFAULT_LEVEL,
            exp: 0,
            chocopie_coins: 0,
            habits: HabitCollections::default(),
            achievements: Vec::new(),
            friends: Vec::new(),
        }
    }

    /// Name shown to other users: the username if one is set,
    /// otherwise the part of the email before the '@'.
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }
}

/// A badge earned by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

/// A confirmed friend connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: u64,
    pub email: String,
    pub name: String,
}
