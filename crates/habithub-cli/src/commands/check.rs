use chrono::Utc;
use habithub_core::storage::Database;
use habithub_core::{Config, HabitStatus, UserStore};

use super::current_user;
use super::profile::ProfileSummary;

/// One evaluation pass: settle elapsed periods for the logged-in
/// user, print the events one per line, then the profile summary.
/// With `watch` the pass repeats on the configured tick interval.
pub fn run(watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let store = UserStore::new(&db, config.evaluator());

    if watch {
        let interval = config.tick_interval();
        loop {
            check_once(&db, &store)?;
            std::thread::sleep(interval);
        }
    } else {
        check_once(&db, &store)
    }
}

fn check_once(db: &Database, store: &UserStore) -> Result<(), Box<dyn std::error::Error>> {
    let user = current_user(db)?;
    let outcome = store.update(&user, Utc::now())?;

    for event in &outcome.events {
        println!("{}", serde_json::to_string(event)?);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&ProfileSummary::from(&outcome.user))?
    );

    let pending: Vec<&str> = outcome
        .user
        .habits
        .active
        .iter()
        .filter(|h| h.status != HabitStatus::Completed)
        .map(|h| h.title.as_str())
        .collect();
    if !pending.is_empty() {
        eprintln!("still waiting on: {}", pending.join(", "));
    }
    Ok(())
}
