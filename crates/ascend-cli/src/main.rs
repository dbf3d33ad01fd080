use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ascend-cli", version, about = "Ascend CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session lifecycle (start, evidence, finish, cancel)
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Profile status, awakening, history, export
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Daily quest
    Quest {
        #[command(subcommand)]
        action: commands::quest::QuestAction,
    },
    /// Reward catalog and claims
    Rewards {
        #[command(subcommand)]
        action: commands::rewards::RewardsAction,
    },
    /// Daily maintenance
    Maintain {
        #[command(subcommand)]
        action: commands::maintain::MaintainAction,
    },
    /// Evidence blob storage
    Storage {
        #[command(subcommand)]
        action: commands::storage::StorageAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Quest { action } => commands::quest::run(action),
        Commands::Rewards { action } => commands::rewards::run(action),
        Commands::Maintain { action } => commands::maintain::run(action),
        Commands::Storage { action } => commands::storage::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
