use chrono::Utc;
use clap::Subcommand;
use habithub_core::storage::Database;

use super::{current_user, open_store};

#[derive(Subcommand)]
pub enum FriendAction {
    /// Add a friend by the email of their account
    Add { email: String },
    /// Remove a friend by email
    Remove { email: String },
    /// List friends as JSON
    List,
}

pub fn run(action: FriendAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let user = current_user(&db)?;

    match action {
        FriendAction::Add { email } => {
            let store = open_store(&db);
            let outcome = store.add_friend(&user, &email, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&outcome.user.friends)?);
        }
        FriendAction::Remove { email } => {
            let store = open_store(&db);
            let outcome = store.remove_friend(&user, &email, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&outcome.user.friends)?);
        }
        FriendAction::List => {
            println!("{}", serde_json::to_string_pretty(&user.friends)?);
        }
    }
    Ok(())
}
