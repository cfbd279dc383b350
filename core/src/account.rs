//! The per-user economy record and the per-user enterprise record.
//!
//! Both are persisted as whole JSON documents; every mutation in the
//! engine is a read-modify-write of one full record (no field-by-field
//! partial updates, so a writer can never clobber sibling fields).

use crate::{
    catalog::{Industry, ItemKind, ProgressKey},
    clock::DayStamp,
    error::GuardReason,
    types::{EpochSecs, Zentrons},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub wallet: Zentrons,
    pub bank: Zentrons,

    // Cooldown timestamps, one per gated action kind.
    pub last_work: EpochSecs,
    pub last_crime: EpochSecs,
    pub last_rob: EpochSecs,
    pub last_buff: EpochSecs,

    /// Date of the last daily claim. Also keys the quest refresh and
    /// the streak bookkeeping — one shared field, by contract.
    pub last_daily: Option<DayStamp>,
    pub daily_streak: u32,

    /// Item counts; zero-count entries are removed, never retained.
    pub inventory: BTreeMap<ItemKind, u32>,
    /// Active buffs: item -> expiry timestamp. Entries past expiry
    /// are logically absent and physically pruned on any buff query.
    pub buffs: BTreeMap<ItemKind, EpochSecs>,

    pub challenges: Vec<ChallengeInstance>,
    pub contracts: Vec<ContractInstance>,

    pub nanopulse_count: u32,
    pub nanopulse_reset: Option<DayStamp>,
}

impl Account {
    pub fn fresh(starting_wallet: Zentrons) -> Self {
        Self {
            wallet: starting_wallet,
            bank: 0,
            last_work: 0,
            last_crime: 0,
            last_rob: 0,
            last_buff: 0,
            last_daily: None,
            daily_streak: 0,
            inventory: BTreeMap::new(),
            buffs: BTreeMap::new(),
            challenges: Vec::new(),
            contracts: Vec::new(),
            nanopulse_count: 0,
            nanopulse_reset: None,
        }
    }

    pub fn net_worth(&self) -> Zentrons {
        self.wallet + self.bank
    }

    pub fn credit(&mut self, amount: Zentrons) {
        self.wallet += amount;
    }

    /// Transactional debit: checked before mutation, never clamped.
    pub fn try_debit(&mut self, amount: Zentrons) -> Result<(), GuardReason> {
        if self.wallet < amount {
            return Err(GuardReason::InsufficientWallet { have: self.wallet, need: amount });
        }
        self.wallet -= amount;
        Ok(())
    }

    /// Apply a signed delta, flooring the wallet at zero. Only the
    /// actions that explicitly clamp (crime, rob fine) use this.
    pub fn apply_clamped(&mut self, delta: Zentrons) {
        self.wallet = (self.wallet + delta).max(0);
    }

    pub fn add_item(&mut self, item: ItemKind, count: u32) {
        *self.inventory.entry(item).or_insert(0) += count;
    }

    /// Remove one of `item`, pruning the entry when it hits zero.
    pub fn remove_item(&mut self, item: ItemKind) -> bool {
        match self.inventory.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.inventory.remove(&item);
                }
                true
            }
            _ => false,
        }
    }
}

/// An active daily challenge. Template fields are copied in at sample
/// time so the instance survives catalog edits within the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChallengeInstance {
    pub task: String,
    pub goal: i64,
    pub key: ProgressKey,
    pub reward: Zentrons,
    pub progress: i64,
}

/// An active industry contract: a challenge with an item reward and
/// a completion window measured from `start_time`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractInstance {
    pub task: String,
    pub goal: i64,
    pub key: ProgressKey,
    pub reward: Zentrons,
    pub item: ItemKind,
    pub progress: i64,
    pub start_time: EpochSecs,
}

impl ContractInstance {
    pub fn within_window(&self, now: EpochSecs, window_secs: i64) -> bool {
        now < self.start_time + window_secs
    }
}

// ── Enterprise ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enterprise {
    pub name: String,
    pub industry: Industry,
    /// Index into the tier ladder.
    pub tier: usize,
    /// Current hourly passive rate. Drifts under market shifts,
    /// independent of the tier's base profit.
    pub profit: Zentrons,
    pub work_bonus: Zentrons,
    pub crime_bonus: Zentrons,
    /// Cumulative net profit paid out by ticks. Monotonic; gates the
    /// next tier investment.
    pub profit_earned: Zentrons,
    pub overclock_active: bool,
    pub overclock_end: EpochSecs,
    pub crash_end: EpochSecs,
    pub created: EpochSecs,
}

impl Enterprise {
    pub fn overclocked(&self, now: EpochSecs) -> bool {
        self.overclock_active && now < self.overclock_end
    }

    pub fn crashed(&self, now: EpochSecs) -> bool {
        now < self.crash_end
    }
}
