//! Gold-gated reward claims.
//!
//! Claims debit gold and prepend an append-only record. A rejected claim
//! leaves state untouched.

use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::profile::{ClaimedReward, ProfileState};

impl ProfileState {
    /// Claim a reward by name at the given cost. Fails with
    /// `InsufficientGold` when the balance cannot cover it.
    pub fn claim_reward(&mut self, name: &str, cost: u64, now_ms: i64) -> Result<&ClaimedReward> {
        if self.gold < cost {
            return Err(LedgerError::InsufficientGold {
                cost,
                gold: self.gold,
            }
            .into());
        }

        self.gold -= cost;
        self.claimed_rewards.insert(
            0,
            ClaimedReward {
                id: Uuid::new_v4(),
                name: name.to_string(),
                cost,
                claimed_at: now_ms,
            },
        );
        Ok(&self.claimed_rewards[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn claim_debits_and_records() {
        let mut p = ProfileState::new(0);
        p.gold = 120;
        let claimed = p.claim_reward("movie", 80, 1_000).unwrap();
        assert_eq!(claimed.name, "movie");
        assert_eq!(claimed.cost, 80);
        assert_eq!(p.gold, 40);
        assert_eq!(p.claimed_rewards.len(), 1);
    }

    #[test]
    fn insufficient_gold_leaves_state_unchanged() {
        let mut p = ProfileState::new(0);
        p.gold = 30;
        let err = p.claim_reward("dayoff", 300, 1_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Ledger(LedgerError::InsufficientGold {
                cost: 300,
                gold: 30,
            })
        ));
        assert_eq!(p.gold, 30);
        assert!(p.claimed_rewards.is_empty());
    }

    #[test]
    fn claims_are_most_recent_first() {
        let mut p = ProfileState::new(0);
        p.gold = 100;
        p.claim_reward("break", 20, 1_000).unwrap();
        p.claim_reward("gaming", 50, 2_000).unwrap();
        assert_eq!(p.claimed_rewards[0].name, "gaming");
        assert_eq!(p.claimed_rewards[1].name, "break");
    }
}
