//! Background world cycles: passive profit, the market shift, and the
//! guild-wide zentron surge.
//!
//! RULE: A cycle never aborts on one bad record. Each entity is
//! processed in isolation; a failure is logged and the sweep moves on.

use crate::{
    buffs,
    catalog::{BuffCategory, ProgressKey},
    clock,
    engine::EconEngine,
    error::EconResult,
    progression,
    quests::{self, ProgressEvent},
    types::{EpochSecs, GuildId, Zentrons},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitReport {
    pub enterprises_paid: usize,
    pub total_paid: Zentrons,
    pub tax_collected: Zentrons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDirection {
    Dip,
    Rise,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    pub direction: MarketDirection,
    pub enterprises_affected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeNotice {
    pub guild: GuildId,
    pub multiplier: f64,
    pub until: EpochSecs,
}

impl EconEngine {
    /// Hourly passive payout. Rate = tier profit adjusted by any live
    /// overclock/crash, then the owner's Profit buffs; 5% withheld
    /// into the tax pool; the net grows both the wallet and the
    /// enterprise's cumulative profit_earned.
    pub fn profit_cycle(&mut self, now: EpochSecs) -> EconResult<ProfitReport> {
        let mut report = ProfitReport { enterprises_paid: 0, total_paid: 0, tax_collected: 0 };
        let mut pool_delta: Zentrons = 0;

        for (user, mut enterprise) in self.store.all_enterprises()? {
            let result: EconResult<()> = (|| {
                let mut account = self.store.account(&user, self.config.starting_wallet)?;
                let rate = progression::current_profit_rate(&enterprise, now);
                let multiplier =
                    buffs::effective_multiplier(&mut account, BuffCategory::Profit, now);
                let payout = (rate as f64 * multiplier) as Zentrons;
                let tax = (payout as f64 * self.config.tax_rate) as Zentrons;
                let net = payout - tax;

                account.credit(net);
                enterprise.profit_earned += net;
                let events = [
                    ProgressEvent::new(ProgressKey::ProfitEarned, net),
                    ProgressEvent::new(ProgressKey::Earned, net),
                ];
                quests::apply_progress(
                    &mut account,
                    now,
                    self.config.contract_window_secs,
                    &events,
                );
                self.store.put_account(&user, &account)?;
                self.store.put_enterprise(&user, &enterprise)?;

                pool_delta += tax;
                report.enterprises_paid += 1;
                report.total_paid += net;
                report.tax_collected += tax;
                Ok(())
            })();
            if let Err(e) = result {
                log::warn!("profit cycle skipped {user}: {e}");
            }
        }

        if pool_delta > 0 {
            let pool = self.store.tax_pool()?;
            self.store.set_tax_pool(pool + pool_delta)?;
        }
        log::info!(
            "profit cycle paid {} enterprises {} zentrons ({} taxed)",
            report.enterprises_paid, report.total_paid, report.tax_collected
        );
        Ok(report)
    }

    /// Daily market perturbation of enterprise profit rates. Even UTC
    /// hours dip (floored), odd hours rise. Orthogonal to the guild
    /// surge, which scales action rewards instead.
    pub fn market_shift(&mut self, now: EpochSecs) -> EconResult<MarketReport> {
        let direction = if clock::utc_hour(now) % 2 == 0 {
            MarketDirection::Dip
        } else {
            MarketDirection::Rise
        };
        let step = self.config.market_shift_step;
        let mut affected = 0;

        for (user, mut enterprise) in self.store.all_enterprises()? {
            enterprise.profit = match direction {
                MarketDirection::Dip => {
                    (enterprise.profit - step).max(self.config.market_profit_floor)
                }
                MarketDirection::Rise => enterprise.profit + step,
            };
            if let Err(e) = self.store.put_enterprise(&user, &enterprise) {
                log::warn!("market shift skipped {user}: {e}");
                continue;
            }
            affected += 1;
        }

        log::info!("market shift: {direction:?} across {affected} enterprises");
        Ok(MarketReport { direction, enterprises_affected: affected })
    }

    /// Open a surge window for one guild: every work/crime reward in
    /// that guild is multiplied until the window closes.
    pub fn start_surge(&mut self, guild: &str, now: EpochSecs) -> EconResult<SurgeNotice> {
        let duration = self.rng.range_i64(
            self.config.surge_duration_min_secs,
            self.config.surge_duration_max_secs,
        );
        let multiplier = if self.rng.chance(self.config.surge_big_chance) {
            self.config.surge_big_multiplier
        } else {
            self.config.surge_multiplier
        };
        let until = now + duration;
        self.store.activate_surge(guild, until, multiplier)?;
        log::info!("surge x{multiplier} in guild {guild} until {until}");
        Ok(SurgeNotice { guild: guild.to_string(), multiplier, until })
    }

    /// The scheduler-facing sweep: start a surge in every known guild.
    pub fn zentron_surge(&mut self, now: EpochSecs) -> EconResult<Vec<SurgeNotice>> {
        let mut notices = Vec::new();
        for guild in self.store.all_guild_ids()? {
            match self.start_surge(&guild, now) {
                Ok(notice) => notices.push(notice),
                Err(e) => log::warn!("surge skipped guild {guild}: {e}"),
            }
        }
        Ok(notices)
    }
}
