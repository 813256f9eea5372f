//! User-state container.
//!
//! [`UserStore`] wraps the account store and the evaluator and applies
//! the write path every mutation goes through: copy the snapshot,
//! apply the edit, evaluate at `now`, persist the settled snapshot.
//! Callers therefore never observe a stored snapshot with unsettled
//! period boundaries.
//!
//! All operations take the caller's current snapshot by reference and
//! return the evaluation outcome; the caller decides what to do with
//! previous state.

use chrono::{DateTime, Utc};

use crate::accounts::{validate_email, AccountStore};
use crate::error::{AccountError, CoreError, Result};
use crate::evaluator::{Evaluation, Evaluator};
use crate::habit::{Habit, HabitStatus, Period};
use crate::import::parse_import;
use crate::storage::Database;
use crate::user::{Achievement, Friend, User};

/// Parameters for creating a habit.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub title: String,
    pub category: String,
    pub period: Period,
    /// Present for quantitative habits.
    pub target_value: Option<u32>,
}

/// Mutation layer over one database connection.
pub struct UserStore<'a> {
    accounts: AccountStore<'a>,
    evaluator: Evaluator,
}

impl<'a> UserStore<'a> {
    pub fn new(db: &'a Database, evaluator: Evaluator) -> Self {
        UserStore {
            accounts: AccountStore::new(db),
            evaluator,
        }
    }

    pub fn accounts(&self) -> &AccountStore<'a> {
        &self.accounts
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate the snapshot at `now`, persist the result, and return
    /// the outcome. Every other operation ends up here.
    pub fn update(&self, user: &User, now: DateTime<Utc>) -> Result<Evaluation> {
        let evaluation = self.evaluator.evaluate(user, now);
        self.accounts.save_snapshot(&evaluation.user)?;
        Ok(evaluation)
    }

    /// Add a habit to the active collection. The id is allocated past
    /// every existing habit id; the first evaluation (performed as
    /// part of this call) anchors its period boundary.
    pub fn add_habit(&self, user: &User, new: NewHabit, now: DateTime<Utc>) -> Result<Evaluation> {
        let mut user = user.clone();
        let mut habit = Habit::new(
            user.habits.next_id(),
            new.title,
            new.category,
            new.period,
            now,
        );
        if let Some(target) = new.target_value {
            habit = habit.with_target(target);
        }
        user.habits.active.push(habit);
        self.update(&user, now)
    }

    /// Set the status of an active habit (mark done, reset, flag
    /// overdue).
    pub fn change_status(
        &self,
        user: &User,
        habit_id: u64,
        status: HabitStatus,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let mut user = user.clone();
        let habit = user
            .habits
            .active
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| CoreError::Custom(format!("no active habit with id {habit_id}")))?;
        habit.status = status;
        self.update(&user, now)
    }

    /// Move a habit from `active` to `completed`. The evaluator never
    /// touches it again; its history is kept.
    pub fn stop_tracking(
        &self,
        user: &User,
        habit_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let mut user = user.clone();
        let index = user
            .habits
            .active
            .iter()
            .position(|h| h.id == habit_id)
            .ok_or_else(|| CoreError::Custom(format!("no active habit with id {habit_id}")))?;
        let habit = user.habits.active.remove(index);
        user.habits.completed.push(habit);
        self.update(&user, now)
    }

    /// Add a friend by email. The email must be well-formed, belong to
    /// an existing account, not be the user's own, and not already be
    /// in the friend list. The friend's display name is taken from
    /// their account.
    pub fn add_friend(
        &self,
        user: &User,
        friend_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        if !validate_email(friend_email) {
            return Err(AccountError::InvalidEmail(friend_email.to_string()).into());
        }
        if friend_email == user.email {
            return Err(CoreError::Custom(
                "cannot add yourself as a friend".to_string(),
            ));
        }
        if user.friends.iter().any(|f| f.email == friend_email) {
            return Err(CoreError::Custom(format!(
                "'{friend_email}' is already a friend"
            )));
        }
        let friend_user = self.accounts.load_snapshot(friend_email)?;

        let mut user = user.clone();
        user.friends.push(Friend {
            id: next_friend_id(&user.friends),
            email: friend_email.to_string(),
            name: friend_user.display_name(),
        });
        self.update(&user, now)
    }

    /// Remove a friend by email. Removing an email that is not in the
    /// list is a no-op.
    pub fn remove_friend(
        &self,
        user: &User,
        friend_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let mut user = user.clone();
        user.friends.retain(|f| f.email != friend_email);
        self.update(&user, now)
    }

    /// Record an earned achievement.
    pub fn add_achievement(
        &self,
        user: &User,
        achievement: Achievement,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let mut user = user.clone();
        user.achievements.push(achievement);
        self.update(&user, now)
    }

    /// Import habits from an exported JSON document. Imported habits
    /// join the active collection with their evaluation state reset;
    /// entries without an id get one allocated.
    pub fn import_habits(
        &self,
        user: &User,
        json: &str,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let import = parse_import(json)?;
        let mut user = user.clone();
        for entry in import.habits {
            let fallback_id = user.habits.next_id();
            user.habits.active.push(entry.into_habit(fallback_id, now));
        }
        self.update(&user, now)
    }
}

fn next_friend_id(friends: &[Friend]) -> u64 {
    friends.iter().map(|f| f.id).max().map_or(1, |m| m + 1)
}
