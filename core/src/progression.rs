//! Progression engine: enterprise founding, tier investment,
//! overclock, and the profit-rate arithmetic the world cycles use.

use crate::{
    account::{Account, Enterprise},
    catalog::{self, Industry, ItemKind, TierSpec, TERMINAL_TIER, TIERS},
    config::GameConfig,
    error::{EconError, EconResult, GuardReason},
    rng::GameRng,
    types::{EpochSecs, Zentrons},
};
use serde::{Deserialize, Serialize};

/// Tier stats scaled by the industry's multipliers, truncated the way
/// every other reward is.
fn scaled_stats(tier: &TierSpec, industry: Industry) -> (Zentrons, Zentrons, Zentrons) {
    let spec = industry.spec();
    (
        (tier.profit as f64 * spec.profit_mult) as Zentrons,
        (tier.work_bonus as f64 * spec.work_mult) as Zentrons,
        (tier.crime_bonus as f64 * spec.crime_mult) as Zentrons,
    )
}

/// One-time enterprise purchase. The duplicate-ownership guard lives
/// in the engine (it needs the store); this debits the cost and
/// builds the tier-0 record.
pub fn found_enterprise(
    config: &GameConfig,
    account: &mut Account,
    name: String,
    industry: Industry,
    now: EpochSecs,
) -> EconResult<Enterprise> {
    account.try_debit(config.enterprise_cost)?;
    let (profit, work_bonus, crime_bonus) = scaled_stats(&TIERS[0], industry);
    Ok(Enterprise {
        name,
        industry,
        tier: 0,
        profit,
        work_bonus,
        crime_bonus,
        profit_earned: 0,
        overclock_active: false,
        overclock_end: 0,
        crash_end: 0,
        created: now,
    })
}

// ── Investment ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestOutcome {
    pub cost: Zentrons,
    pub success: bool,
    pub jackpot: bool,
    pub tier: usize,
    pub tier_name: String,
    pub rare_drop: Option<ItemKind>,
}

/// Attempt a tier advancement. The cost is sunk the moment the guards
/// clear — a failed roll still keeps the money.
pub fn invest(
    config: &GameConfig,
    account: &mut Account,
    enterprise: &mut Enterprise,
    rng: &mut GameRng,
) -> EconResult<InvestOutcome> {
    if enterprise.tier >= TERMINAL_TIER {
        return Err(GuardReason::TerminalTier.into());
    }
    let next = enterprise.tier + 1;
    let spec = &TIERS[next];
    let Some(cost) = spec.invest_cost else {
        return Err(GuardReason::TerminalTier.into());
    };
    if account.wallet < cost {
        return Err(GuardReason::InsufficientWallet { have: account.wallet, need: cost }.into());
    }
    if enterprise.profit_earned < spec.profit_needed {
        return Err(EconError::not_eligible(format!(
            "need {} zentrons earned from profit, have {}",
            spec.profit_needed, enterprise.profit_earned
        )));
    }

    account.try_debit(cost)?;
    let success = rng.chance(spec.success_rate);
    let jackpot = success && rng.chance(config.invest_jackpot_chance);

    let mut rare_drop = None;
    if success {
        enterprise.tier = (next + usize::from(jackpot)).min(TERMINAL_TIER);
        let (profit, work_bonus, crime_bonus) =
            scaled_stats(&TIERS[enterprise.tier], enterprise.industry);
        enterprise.profit = profit;
        enterprise.work_bonus = work_bonus;
        enterprise.crime_bonus = crime_bonus;
        if rng.chance(config.invest_drop_chance) {
            let drop = *rng.pick(&[
                ItemKind::NanoChip,
                ItemKind::TechRelic,
                ItemKind::CryptoKey,
                ItemKind::DarkCache,
            ]);
            account.add_item(drop, 1);
            rare_drop = Some(drop);
        }
    }

    Ok(InvestOutcome {
        cost,
        success,
        jackpot,
        tier: enterprise.tier,
        tier_name: catalog::TIERS[enterprise.tier].name.to_string(),
        rare_drop,
    })
}

// ── Overclock ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OverclockOutcome {
    /// Boost engaged: triple profit until `until`.
    Engaged { stake: Zentrons, until: EpochSecs },
    /// Backfired straight into a crash: half profit until `until`.
    Crashed { stake: Zentrons, until: EpochSecs },
}

pub fn overclock(
    config: &GameConfig,
    account: &mut Account,
    enterprise: &mut Enterprise,
    now: EpochSecs,
    rng: &mut GameRng,
) -> EconResult<OverclockOutcome> {
    if enterprise.overclocked(now) {
        return Err(GuardReason::OverclockActive {
            remaining_secs: enterprise.overclock_end - now,
        }
        .into());
    }
    if enterprise.crashed(now) {
        return Err(GuardReason::CrashRecovery {
            remaining_secs: enterprise.crash_end - now,
        }
        .into());
    }

    let stake = (account.wallet as f64 * config.overclock_stake_fraction) as Zentrons;
    if stake < config.overclock_stake_minimum {
        return Err(EconError::not_eligible(format!(
            "overclock stake is {}% of wallet with a {} zentron floor",
            (config.overclock_stake_fraction * 100.0) as i64,
            config.overclock_stake_minimum
        )));
    }

    // The stake is charged whether or not the boost engages.
    account.try_debit(stake)?;
    if rng.chance(config.overclock_crash_chance) {
        enterprise.overclock_active = false;
        enterprise.crash_end = now + config.crash_duration_secs;
        Ok(OverclockOutcome::Crashed { stake, until: enterprise.crash_end })
    } else {
        enterprise.overclock_active = true;
        enterprise.overclock_end = now + config.overclock_duration_secs;
        Ok(OverclockOutcome::Engaged { stake, until: enterprise.overclock_end })
    }
}

/// The hourly passive rate with overclock/crash applied. The crash
/// halving is an integer floor.
pub fn current_profit_rate(enterprise: &Enterprise, now: EpochSecs) -> Zentrons {
    if enterprise.overclocked(now) {
        enterprise.profit * 3
    } else if enterprise.crashed(now) {
        enterprise.profit / 2
    } else {
        enterprise.profit
    }
}
