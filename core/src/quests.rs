//! Quest engine: daily challenges, industry contracts, progress
//! routing, and reward settlement.
//!
//! RULES:
//!   - Refresh is keyed to the shared daily-claim date: a set is
//!     resampled whenever it is empty or `last_daily` is not today.
//!     Claiming the daily bonus is what pins the date.
//!   - Progress routes by event tag; increments clamp at the goal.
//!   - A challenge pays out and leaves the set the moment its goal is
//!     reached. A contract additionally requires the attempt to land
//!     inside its completion window; a late contract keeps its
//!     progress but never pays, and only the next refresh discards it.

use crate::{
    account::{Account, ChallengeInstance, ContractInstance},
    catalog::{self, Industry, ItemKind, ProgressKey},
    clock::DayStamp,
    config::GameConfig,
    rng::GameRng,
    types::{EpochSecs, Zentrons},
};
use serde::{Deserialize, Serialize};

/// One routed progress signal emitted by an action.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent {
    pub key: ProgressKey,
    pub amount: i64,
}

impl ProgressEvent {
    pub fn new(key: ProgressKey, amount: i64) -> Self {
        Self { key, amount }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    Challenge,
    Contract,
}

/// A settled quest: reward already credited when this is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestPayout {
    pub kind: QuestKind,
    pub task: String,
    pub reward: Zentrons,
    pub item: Option<ItemKind>,
}

/// Resample the daily challenge set if it is stale or empty.
pub fn refresh_challenges(
    config: &GameConfig,
    account: &mut Account,
    today: DayStamp,
    rng: &mut GameRng,
) {
    if !account.challenges.is_empty() && account.last_daily == Some(today) {
        return;
    }
    let picks = rng.sample_indices(catalog::CHALLENGES.len(), config.active_quest_count);
    account.challenges = picks
        .into_iter()
        .map(|i| {
            let spec = &catalog::CHALLENGES[i];
            ChallengeInstance {
                task: spec.task.to_string(),
                goal: spec.goal,
                key: spec.key,
                reward: spec.reward,
                progress: 0,
            }
        })
        .collect();
}

/// Resample the contract set from the enterprise's industry table.
/// No enterprise means no contracts; the stored list is untouched.
pub fn refresh_contracts(
    config: &GameConfig,
    account: &mut Account,
    industry: Option<Industry>,
    today: DayStamp,
    now: EpochSecs,
    rng: &mut GameRng,
) {
    let Some(industry) = industry else { return };
    if !account.contracts.is_empty() && account.last_daily == Some(today) {
        return;
    }
    let table = catalog::contracts_for(industry);
    let picks = rng.sample_indices(table.len(), config.active_quest_count);
    account.contracts = picks
        .into_iter()
        .map(|i| {
            let spec = &table[i];
            ContractInstance {
                task: spec.task.to_string(),
                goal: spec.goal,
                key: spec.key,
                reward: spec.reward,
                item: spec.item,
                progress: 0,
                start_time: now,
            }
        })
        .collect();
}

/// Route `events` into the active quest sets, crediting rewards and
/// removing settled instances. A settled challenge itself counts as
/// ChallengesCompleted progress for contracts.
pub fn apply_progress(
    account: &mut Account,
    now: EpochSecs,
    window_secs: i64,
    events: &[ProgressEvent],
) -> Vec<QuestPayout> {
    let mut payouts = Vec::new();

    // Challenges settle first so completions can feed contracts.
    let mut completions = 0i64;
    let taken = std::mem::take(&mut account.challenges);
    for mut challenge in taken {
        advance(&mut challenge.progress, challenge.goal, challenge.key, events);
        if challenge.progress >= challenge.goal {
            account.credit(challenge.reward);
            completions += 1;
            log::info!("challenge settled: '{}' (+{})", challenge.task, challenge.reward);
            payouts.push(QuestPayout {
                kind: QuestKind::Challenge,
                task: challenge.task,
                reward: challenge.reward,
                item: None,
            });
        } else {
            account.challenges.push(challenge);
        }
    }

    let mut contract_events = events.to_vec();
    if completions > 0 {
        contract_events.push(ProgressEvent::new(ProgressKey::ChallengesCompleted, completions));
    }

    let taken = std::mem::take(&mut account.contracts);
    for mut contract in taken {
        advance(&mut contract.progress, contract.goal, contract.key, &contract_events);
        if contract.progress >= contract.goal && contract.within_window(now, window_secs) {
            account.credit(contract.reward);
            account.add_item(contract.item, 1);
            log::info!(
                "contract settled: '{}' (+{} and {})",
                contract.task, contract.reward, contract.item
            );
            payouts.push(QuestPayout {
                kind: QuestKind::Contract,
                task: contract.task,
                reward: contract.reward,
                item: Some(contract.item),
            });
        } else {
            account.contracts.push(contract);
        }
    }

    payouts
}

fn advance(progress: &mut i64, goal: i64, key: ProgressKey, events: &[ProgressEvent]) {
    for event in events {
        if event.key != key {
            continue;
        }
        if key.is_absolute() {
            *progress = event.amount;
        } else {
            *progress = (*progress + event.amount).min(goal);
        }
    }
}
