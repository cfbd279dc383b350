//! Player-initiated actions: the earn/risk trio (work, crime, rob)
//! plus balance moves, the daily bonus, nanopulses, and buff use.
//!
//! Every function here is a pure state machine over in-memory records:
//! Idle -> (guards pass?) -> Executing -> Idle. The engine owns the
//! store round-trip. Guards reject before any mutation; in particular
//! a rob that fails its guards never consumes the rob cooldown.

use crate::{
    account::{Account, Enterprise},
    buffs,
    catalog::{BuffCategory, ItemKind},
    clock::{days_between, DayStamp},
    config::GameConfig,
    error::{EconResult, GuardReason},
    rng::GameRng,
    types::{EpochSecs, Zentrons},
};
use serde::{Deserialize, Serialize};

fn check_cooldown(last: EpochSecs, window: i64, now: EpochSecs) -> Result<(), GuardReason> {
    let elapsed = now - last;
    if elapsed < window {
        return Err(GuardReason::CooldownActive { remaining_secs: window - elapsed });
    }
    Ok(())
}

// ── Work ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RareDrop {
    pub item: ItemKind,
    pub bonus: Zentrons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOutcome {
    pub earned: Zentrons,
    pub enterprise_bonus: Zentrons,
    pub rare_drop: Option<RareDrop>,
    pub surge_multiplier: f64,
    pub wallet: Zentrons,
}

pub fn work(
    config: &GameConfig,
    account: &mut Account,
    enterprise: Option<&Enterprise>,
    surge: f64,
    now: EpochSecs,
    rng: &mut GameRng,
) -> EconResult<WorkOutcome> {
    check_cooldown(account.last_work, config.work_cooldown, now)?;

    let base = rng.range_i64(config.work_base_min, config.work_base_max);
    let bonus = enterprise.map_or(0, |e| e.work_bonus);
    let multiplier = buffs::effective_multiplier(account, BuffCategory::Work, now);
    let mut earned = ((base + bonus) as f64 * multiplier * surge) as Zentrons;

    let rare_drop = if rng.chance(config.work_drop_chance) {
        let (item, lo, hi) = *rng.pick(&[
            (ItemKind::NanoChip, 50, 150),
            (ItemKind::TechRelic, 200, 500),
        ]);
        let drop_bonus = rng.range_i64(lo, hi);
        earned += drop_bonus;
        account.add_item(item, 1);
        Some(RareDrop { item, bonus: drop_bonus })
    } else {
        None
    };

    account.credit(earned);
    account.last_work = now;
    Ok(WorkOutcome {
        earned,
        enterprise_bonus: bonus,
        rare_drop,
        surge_multiplier: surge,
        wallet: account.wallet,
    })
}

// ── Crime ──────────────────────────────────────────────────────────

/// The categorical outcome table: two positive ranges, one neutral,
/// two punitive ranges. A uniform draw picks the row, then the row's
/// range is rolled.
const CRIME_OUTCOMES: [(&str, i64, i64); 5] = [
    ("Jackpot! You hacked a vault!", 100, 300),
    ("Smooth gig, scored some cash.", 20, 50),
    ("Bust! Got nothing this time.", 0, 0),
    ("Caught! Paid a small fine.", -30, -10),
    ("Busted big! Lost a chunk.", -100, -50),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrimeOutcome {
    pub flavor: String,
    pub net_change: Zentrons,
    pub enterprise_bonus: Zentrons,
    pub rare_drop: Option<RareDrop>,
    pub surge_multiplier: f64,
    pub wallet: Zentrons,
}

pub fn crime(
    config: &GameConfig,
    account: &mut Account,
    enterprise: Option<&Enterprise>,
    surge: f64,
    now: EpochSecs,
    rng: &mut GameRng,
) -> EconResult<CrimeOutcome> {
    check_cooldown(account.last_crime, config.crime_cooldown, now)?;

    let (flavor, lo, hi) = *rng.pick(&CRIME_OUTCOMES);
    let delta = rng.range_i64(lo, hi);
    let bonus = enterprise.map_or(0, |e| e.crime_bonus);
    let multiplier = buffs::effective_multiplier(account, BuffCategory::Crime, now);
    let mut net = ((delta + bonus) as f64 * multiplier * surge) as Zentrons;

    let rare_drop = if net > 0 && rng.chance(config.crime_drop_chance) {
        let (item, drop_lo, drop_hi) = *rng.pick(&[
            (ItemKind::CryptoKey, 100, 300),
            (ItemKind::DarkCache, 500, 1000),
        ]);
        let drop_bonus = rng.range_i64(drop_lo, drop_hi);
        net += drop_bonus;
        account.add_item(item, 1);
        Some(RareDrop { item, bonus: drop_bonus })
    } else {
        None
    };

    // Crime clamps rather than rejects: a big bust can only drain the
    // wallet to zero.
    account.apply_clamped(net);
    account.last_crime = now;
    Ok(CrimeOutcome {
        flavor: flavor.to_string(),
        net_change: net,
        enterprise_bonus: bonus,
        rare_drop,
        surge_multiplier: surge,
        wallet: account.wallet,
    })
}

// ── Rob ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RobOutcome {
    /// The cut left the victim's wallet and entered the robber's.
    Success { taken: Zentrons, wallet: Zentrons },
    /// The flip failed; the robber paid a fine out of their wallet.
    Caught { fine: Zentrons, wallet: Zentrons },
}

pub fn rob(
    config: &GameConfig,
    robber: &mut Account,
    victim: &mut Account,
    now: EpochSecs,
    rng: &mut GameRng,
) -> EconResult<RobOutcome> {
    // Guards first; only a determined outcome consumes the cooldown.
    check_cooldown(robber.last_rob, config.rob_cooldown, now)?;
    if buffs::anti_rob_active(victim, now) {
        return Err(GuardReason::TargetShielded.into());
    }
    if victim.wallet < config.rob_minimum_target {
        return Err(GuardReason::TargetTooPoor { minimum: config.rob_minimum_target }.into());
    }

    let outcome = if rng.chance(config.rob_success_chance) {
        let cut = rng.fraction(config.rob_take_min, config.rob_take_max);
        let taken = (victim.wallet as f64 * cut) as Zentrons;
        victim.wallet -= taken;
        robber.credit(taken);
        RobOutcome::Success { taken, wallet: robber.wallet }
    } else {
        let fine = (robber.wallet as f64 * config.rob_fine_fraction) as Zentrons;
        robber.apply_clamped(-fine);
        RobOutcome::Caught { fine, wallet: robber.wallet }
    };
    robber.last_rob = now;
    Ok(outcome)
}

// ── Bank and transfers ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankOp {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankOutcome {
    pub op: BankOp,
    pub amount: Zentrons,
    pub wallet: Zentrons,
    pub bank: Zentrons,
}

pub fn bank_move(
    account: &mut Account,
    op: BankOp,
    amount: Zentrons,
) -> EconResult<BankOutcome> {
    match op {
        BankOp::Deposit => {
            account.try_debit(amount)?;
            account.bank += amount;
        }
        BankOp::Withdraw => {
            if account.bank < amount {
                return Err(GuardReason::InsufficientBank {
                    have: account.bank,
                    need: amount,
                }
                .into());
            }
            account.bank -= amount;
            account.wallet += amount;
        }
    }
    Ok(BankOutcome { op, amount, wallet: account.wallet, bank: account.bank })
}

pub fn transfer(
    sender: &mut Account,
    receiver: &mut Account,
    amount: Zentrons,
) -> EconResult<()> {
    sender.try_debit(amount)?;
    receiver.credit(amount);
    Ok(())
}

// ── Nanopulse ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NanopulseOutcome {
    pub reward: Zentrons,
    pub remaining_today: u32,
}

pub fn nanopulse(
    config: &GameConfig,
    sender: &mut Account,
    receiver: &mut Account,
    today: DayStamp,
) -> EconResult<NanopulseOutcome> {
    if sender.nanopulse_reset != Some(today) {
        sender.nanopulse_count = 0;
        sender.nanopulse_reset = Some(today);
    }
    if sender.nanopulse_count >= config.nanopulse_limit {
        return Err(GuardReason::PulseLimitReached { limit: config.nanopulse_limit }.into());
    }
    sender.nanopulse_count += 1;
    receiver.credit(config.nanopulse_reward);
    Ok(NanopulseOutcome {
        reward: config.nanopulse_reward,
        remaining_today: config.nanopulse_limit - sender.nanopulse_count,
    })
}

// ── Daily bonus ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOutcome {
    pub reward: Zentrons,
    pub streak: u32,
    pub wallet: Zentrons,
}

pub fn daily(
    config: &GameConfig,
    account: &mut Account,
    today: DayStamp,
) -> EconResult<DailyOutcome> {
    if account.last_daily == Some(today) {
        return Err(GuardReason::DailyAlreadyClaimed.into());
    }
    // A fully skipped calendar day breaks the streak before this
    // claim counts as day one.
    if let Some(last) = account.last_daily {
        if days_between(last, today) > 1 {
            account.daily_streak = 0;
        }
    }
    account.daily_streak += 1;
    let reward = (config.daily_base * account.daily_streak as Zentrons).min(config.daily_cap);
    account.credit(reward);
    account.last_daily = Some(today);
    Ok(DailyOutcome { reward, streak: account.daily_streak, wallet: account.wallet })
}

// ── Buff use ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseOutcome {
    pub item: ItemKind,
    pub category: BuffCategory,
    pub multiplier: f64,
    pub expires_at: EpochSecs,
}

pub fn use_item(
    config: &GameConfig,
    account: &mut Account,
    item: ItemKind,
    now: EpochSecs,
) -> EconResult<UseOutcome> {
    check_cooldown(account.last_buff, config.buff_cooldown, now)?;
    if !account.remove_item(item) {
        return Err(GuardReason::ItemNotHeld { item: item.name().to_string() }.into());
    }
    let expires_at = buffs::activate(account, item, now);
    account.last_buff = now;
    let spec = item.buff();
    Ok(UseOutcome {
        item,
        category: spec.category,
        multiplier: spec.multiplier,
        expires_at,
    })
}
