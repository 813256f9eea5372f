pub mod account;
pub mod check;
pub mod config;
pub mod friend;
pub mod habit;
pub mod profile;

use habithub_core::storage::Database;
use habithub_core::{AccountStore, Config, User, UserStore};

/// kv key holding the email of the logged-in account.
pub const SESSION_KEY: &str = "session_email";

/// Load the logged-in user's snapshot.
pub fn current_user(db: &Database) -> Result<User, Box<dyn std::error::Error>> {
    let email = db
        .kv_get(SESSION_KEY)?
        .ok_or("not logged in (run `habithub-cli account login` first)")?;
    Ok(AccountStore::new(db).load_snapshot(&email)?)
}

/// Build the store with the evaluator the config describes.
pub fn open_store(db: &Database) -> UserStore<'_> {
    let config = Config::load_or_default();
    UserStore::new(db, config.evaluator())
}
