use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habithub-cli", version, about = "HabitHub CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Settle elapsed periods for the logged-in user
    Check {
        /// Keep checking on the configured tick interval
        #[arg(long)]
        watch: bool,
    },
    /// Show the profile summary
    Profile,
    /// Friend management
    Friend {
        #[command(subcommand)]
        action: commands::friend::FriendAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Account { action } => commands::account::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Check { watch } => commands::check::run(watch),
        Commands::Profile => commands::profile::run(),
        Commands::Friend { action } => commands::friend::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
