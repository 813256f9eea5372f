use clap::Subcommand;
use habithub_core::storage::Database;
use habithub_core::AccountStore;

use super::SESSION_KEY;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Register a new account and log in
    Register {
        email: String,
        password: String,
        /// Display name shown to friends
        #[arg(long)]
        username: Option<String>,
        /// Avatar identifier or URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Log in to an existing account
    Login { email: String, password: String },
    /// Log out of the current session
    Logout,
    /// Print the logged-in email
    Whoami,
}

pub fn run(action: AccountAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        AccountAction::Register {
            email,
            password,
            username,
            avatar,
        } => {
            let user = AccountStore::new(&db).create(&email, &password, username, avatar)?;
            db.kv_set(SESSION_KEY, &user.email)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        AccountAction::Login { email, password } => {
            let user = AccountStore::new(&db).verify(&email, &password)?;
            db.kv_set(SESSION_KEY, &user.email)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        AccountAction::Logout => {
            db.kv_delete(SESSION_KEY)?;
            println!("logged out");
        }
        AccountAction::Whoami => match db.kv_get(SESSION_KEY)? {
            Some(email) => println!("{email}"),
            None => {
                eprintln!("not logged in");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
