use ascend_core::Database;
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum MaintainAction {
    /// Run the once-per-day pass (a no-op if already run today)
    Run {
        /// Seed for the quest draw (reproducible runs)
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(action: MaintainAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = common::now_ms();

    match action {
        MaintainAction::Run { seed } => {
            let mut rng = common::make_rng(seed);
            let (_, report) = common::load_profile(&db, now, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
