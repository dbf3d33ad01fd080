use std::path::PathBuf;

use ascend_core::{Config, Database, ProgressReport};
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the full progress report as JSON
    Status,
    /// Record the one-time awakening ritual
    Awakening {
        /// What you are working toward
        #[arg(long)]
        vision: String,
        /// What you refuse to become
        #[arg(long)]
        anti_vision: String,
    },
    /// Recent session history
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Write the progress report to a file (or stdout) and reset the
    /// export reminder
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = common::now_ms();
    let mut rng = common::make_rng(None);

    match action {
        ProfileAction::Status => {
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            let report = ProgressReport::build(&profile, now);
            println!("{}", serde_json::to_string_pretty(&report)?);

            let config = Config::load()?;
            if db.export_due(now, config.export_reminder_days)? {
                eprintln!(
                    "reminder: no export in the last {} days -- run `ascend-cli profile export`",
                    config.export_reminder_days
                );
            }
        }
        ProfileAction::Awakening { vision, anti_vision } => {
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            profile.awakening.vision = vision;
            profile.awakening.anti_vision = anti_vision;
            profile.awakening.completed = true;
            common::save_profile(&db, &profile)?;
            println!("{}", serde_json::to_string_pretty(&profile.awakening)?);
        }
        ProfileAction::History { limit } => {
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            let records: Vec<_> = profile.session_history.iter().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        ProfileAction::Export { output } => {
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            let report = ProgressReport::build(&profile, now);
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    eprintln!("report written to {}", path.display());
                }
                None => println!("{json}"),
            }
            db.mark_exported(now)?;
        }
    }

    Ok(())
}
