use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use habithub_core::storage::Database;
use habithub_core::{Habit, HabitStatus, NewHabit, Period};

use super::{current_user, open_store};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        title: String,
        /// Grouping label shown in listings
        #[arg(long, default_value = "")]
        category: String,
        /// daily, weekly, or monthly
        #[arg(long, default_value = "daily")]
        period: String,
        /// Target count; makes the habit quantitative
        #[arg(long)]
        target: Option<u32>,
    },
    /// List all habit collections as JSON
    List,
    /// Mark a habit completed for the current period
    Done { id: u64 },
    /// Reset a habit's status for the current period
    Reset { id: u64 },
    /// Flag a habit overdue
    Overdue { id: u64 },
    /// Stop tracking a habit (moves it to history)
    Stop { id: u64 },
    /// Import habits from an exported JSON document
    Import { path: PathBuf },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = open_store(&db);
    let user = current_user(&db)?;
    let now = Utc::now();

    match action {
        HabitAction::Add {
            title,
            category,
            period,
            target,
        } => {
            let outcome = store.add_habit(
                &user,
                NewHabit {
                    title,
                    category,
                    period: Period::parse(&period),
                    target_value: target,
                },
                now,
            )?;
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome.user.habits.active)?
            );
        }
        HabitAction::List => {
            println!("{}", serde_json::to_string_pretty(&user.habits)?);
        }
        HabitAction::Done { id } => {
            let outcome = store.change_status(&user, id, HabitStatus::Completed, now)?;
            print_habit(&outcome.user.habits.active, id)?;
        }
        HabitAction::Reset { id } => {
            let outcome = store.change_status(&user, id, HabitStatus::Default, now)?;
            print_habit(&outcome.user.habits.active, id)?;
        }
        HabitAction::Overdue { id } => {
            let outcome = store.change_status(&user, id, HabitStatus::Overdue, now)?;
            print_habit(&outcome.user.habits.active, id)?;
        }
        HabitAction::Stop { id } => {
            let outcome = store.stop_tracking(&user, id, now)?;
            print_habit(&outcome.user.habits.completed, id)?;
        }
        HabitAction::Import { path } => {
            let json = std::fs::read_to_string(&path)?;
            let outcome = store.import_habits(&user, &json, now)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome.user.habits.active)?
            );
        }
    }
    Ok(())
}

fn print_habit(habits: &[Habit], id: u64) -> Result<(), Box<dyn std::error::Error>> {
    match habits.iter().find(|h| h.id == id) {
        Some(habit) => println!("{}", serde_json::to_string_pretty(habit)?),
        None => println!("ok"),
    }
    Ok(())
}
