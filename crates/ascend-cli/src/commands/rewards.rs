use ascend_core::{Config, Database};
use clap::Subcommand;
use serde::Serialize;

use super::common;

#[derive(Subcommand)]
pub enum RewardsAction {
    /// Show the catalog, current gold, and recent claims
    List,
    /// Claim a reward from the catalog
    Claim {
        /// Catalog name (e.g. "movie")
        #[arg(long)]
        name: String,
        /// Override the catalog cost
        #[arg(long)]
        cost: Option<u64>,
    },
}

#[derive(Serialize)]
struct RewardsView<'a> {
    gold: u64,
    catalog: &'a [ascend_core::RewardDef],
    claimed: &'a [ascend_core::ClaimedReward],
}

pub fn run(action: RewardsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = common::now_ms();
    let mut rng = common::make_rng(None);
    let config = Config::load()?;

    match action {
        RewardsAction::List => {
            let (profile, _) = common::load_profile(&db, now, &mut rng)?;
            let view = RewardsView {
                gold: profile.gold,
                catalog: &config.rewards,
                claimed: &profile.claimed_rewards,
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        RewardsAction::Claim { name, cost } => {
            let (mut profile, _) = common::load_profile(&db, now, &mut rng)?;
            let cost = match cost {
                Some(cost) => cost,
                None => {
                    config
                        .reward(&name)
                        .ok_or_else(|| format!("unknown reward '{name}'"))?
                        .cost
                }
            };
            let claimed = profile.claim_reward(&name, cost, now)?.clone();
            common::save_profile(&db, &profile)?;
            println!("{}", serde_json::to_string_pretty(&claimed)?);
        }
    }

    Ok(())
}
