use ascend_core::Database;
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum QuestAction {
    /// Print today's quest as JSON
    Show,
}

pub fn run(action: QuestAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = common::now_ms();
    let mut rng = common::make_rng(None);

    match action {
        QuestAction::Show => {
            // Maintenance on load generates today's quest when missing.
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            match &profile.daily_quest {
                Some(quest) => println!("{}", serde_json::to_string_pretty(quest)?),
                None => println!("{{\"quest\": null}}"),
            }
        }
    }

    Ok(())
}
