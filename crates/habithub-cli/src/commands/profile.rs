use habithub_core::storage::Database;
use habithub_core::User;
use serde::Serialize;

use super::current_user;

/// Vitals summary printed by `profile` and after every check.
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub email: String,
    pub name: String,
    pub hp: i32,
    pub level: u32,
    pub exp: u32,
    pub chocopie_coins: u32,
    pub active_habits: usize,
    pub friends: usize,
    pub achievements: usize,
}

impl From<&User> for ProfileSummary {
    fn from(user: &User) -> Self {
        ProfileSummary {
            email: user.email.clone(),
            name: user.display_name(),
            hp: user.hp,
            level: user.level,
            exp: user.exp,
            chocopie_coins: user.chocopie_coins,
            active_habits: user.habits.active.len(),
            friends: user.friends.len(),
            achievements: user.achievements.len(),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let user = current_user(&db)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&ProfileSummary::from(&user))?
    );
    Ok(())
}
