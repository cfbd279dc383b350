//! The engine facade: every player-facing operation, plus dispatch.
//!
//! RULE: All mutation funnels through `&mut self`. One mutation is in
//! flight per engine, so each store round-trip (read record, mutate,
//! write record) is serialized. Callers that need concurrency wrap the
//! engine in a mutex; the scheduler does exactly that.
//!
//! Execution shape of an earn action: load records -> guards ->
//! action function -> quest refresh + progress routing -> persist.

use crate::{
    account::{Account, Enterprise},
    actions::{self, BankOp},
    catalog, clock,
    command::{
        ActiveBuffView, BonusOutcome, Command, EnterpriseStatus, FundsView, HelpTopic,
        IndustryView, Invocation, InventoryEntry, LeaderboardRow, NextTierView, Outcome,
    },
    config::GameConfig,
    error::{EconError, EconResult, GuardReason},
    progression,
    quests::{self, ProgressEvent, QuestPayout},
    rng::GameRng,
    store::EconStore,
    types::{EpochSecs, Zentrons},
};
use crate::catalog::{Industry, ItemKind, ProgressKey};

pub struct EconEngine {
    pub(crate) config: GameConfig,
    pub(crate) store: EconStore,
    pub(crate) rng: GameRng,
}

impl EconEngine {
    pub fn new(config: GameConfig, store: EconStore, seed: u64) -> Self {
        Self { config, store, rng: GameRng::seed_from(seed) }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // ── Record helpers ─────────────────────────────────────────

    fn account(&self, user: &str) -> EconResult<Account> {
        self.store.account(user, self.config.starting_wallet)
    }

    /// Resample stale quest sets. Refresh keys off `last_daily`, so
    /// this must run before a daily claim pins today's date.
    fn refresh_quests(
        &mut self,
        account: &mut Account,
        industry: Option<Industry>,
        now: EpochSecs,
    ) {
        let today = clock::utc_day(now);
        quests::refresh_challenges(&self.config, account, today, &mut self.rng);
        quests::refresh_contracts(&self.config, account, industry, today, now, &mut self.rng);
    }

    fn settle_quests(
        &self,
        account: &mut Account,
        now: EpochSecs,
        events: &[ProgressEvent],
    ) -> Vec<QuestPayout> {
        quests::apply_progress(account, now, self.config.contract_window_secs, events)
    }

    fn require_positive(amount: Zentrons) -> EconResult<()> {
        if amount <= 0 {
            return Err(EconError::validation("amount must be positive"));
        }
        Ok(())
    }

    // ── Balances ───────────────────────────────────────────────

    pub fn funds(&mut self, inv: &Invocation) -> EconResult<FundsView> {
        let account = self.account(&inv.user)?;
        let net_worth = account.net_worth();
        Ok(FundsView {
            wallet: account.wallet,
            bank: account.bank,
            net_worth,
            title: catalog::title_for(net_worth).to_string(),
        })
    }

    pub fn bank(
        &mut self,
        inv: &Invocation,
        op: BankOp,
        amount: Zentrons,
    ) -> EconResult<actions::BankOutcome> {
        Self::require_positive(amount)?;
        let mut account = self.account(&inv.user)?;
        let outcome = actions::bank_move(&mut account, op, amount)?;
        self.store.put_account(&inv.user, &account)?;
        Ok(outcome)
    }

    pub fn transfer(
        &mut self,
        inv: &Invocation,
        target: &str,
        amount: Zentrons,
    ) -> EconResult<Outcome> {
        Self::require_positive(amount)?;
        if target == inv.user {
            return Err(GuardReason::SelfTarget.into());
        }
        let mut sender = self.account(&inv.user)?;
        let mut receiver = self.account(target)?;
        actions::transfer(&mut sender, &mut receiver, amount)?;
        self.store.put_account(&inv.user, &sender)?;
        self.store.put_account(target, &receiver)?;
        log::info!("{} transferred {} zentrons to {}", inv.user, amount, target);
        Ok(Outcome::Transferred {
            target: target.to_string(),
            amount,
            wallet: sender.wallet,
        })
    }

    // ── Earn actions ───────────────────────────────────────────

    pub fn work(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut account = self.account(&inv.user)?;
        let enterprise = self.store.enterprise(&inv.user)?;
        let surge = self.store.surge_multiplier(&inv.guild, inv.now)?;
        self.refresh_quests(&mut account, enterprise.as_ref().map(|e| e.industry), inv.now);

        let outcome = actions::work(
            &self.config,
            &mut account,
            enterprise.as_ref(),
            surge,
            inv.now,
            &mut self.rng,
        )?;
        let events = [
            ProgressEvent::new(ProgressKey::Earned, outcome.earned),
            ProgressEvent::new(ProgressKey::WorkCount, 1),
            ProgressEvent::new(ProgressKey::WorkEarned, outcome.earned),
        ];
        let quests = self.settle_quests(&mut account, inv.now, &events);
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Work { outcome, quests })
    }

    pub fn crime(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut account = self.account(&inv.user)?;
        let enterprise = self.store.enterprise(&inv.user)?;
        let surge = self.store.surge_multiplier(&inv.guild, inv.now)?;
        self.refresh_quests(&mut account, enterprise.as_ref().map(|e| e.industry), inv.now);

        let outcome = actions::crime(
            &self.config,
            &mut account,
            enterprise.as_ref(),
            surge,
            inv.now,
            &mut self.rng,
        )?;
        // Losses count the attempt but never progress earn totals.
        let mut events = vec![ProgressEvent::new(ProgressKey::CrimeCount, 1)];
        if outcome.net_change > 0 {
            events.push(ProgressEvent::new(ProgressKey::Earned, outcome.net_change));
            events.push(ProgressEvent::new(ProgressKey::CrimeEarned, outcome.net_change));
        }
        let quests = self.settle_quests(&mut account, inv.now, &events);
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Crime { outcome, quests })
    }

    pub fn rob(&mut self, inv: &Invocation, target: &str) -> EconResult<Outcome> {
        if target == inv.user {
            return Err(GuardReason::SelfTarget.into());
        }
        let mut robber = self.account(&inv.user)?;
        let mut victim = self.account(target)?;
        let outcome = actions::rob(&self.config, &mut robber, &mut victim, inv.now, &mut self.rng)?;
        self.store.put_account(&inv.user, &robber)?;
        self.store.put_account(target, &victim)?;
        Ok(Outcome::Rob(outcome))
    }

    pub fn daily(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut account = self.account(&inv.user)?;
        let enterprise = self.store.enterprise(&inv.user)?;
        // Refresh before the claim: the claim pins last_daily to today,
        // and a stale set must be resampled against yesterday's date.
        self.refresh_quests(&mut account, enterprise.as_ref().map(|e| e.industry), inv.now);

        let today = clock::utc_day(inv.now);
        let outcome = actions::daily(&self.config, &mut account, today)?;
        // The claim itself is not quest progress: the reward never
        // routes into the sets it just resampled.
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Daily { outcome, quests: Vec::new() })
    }

    pub fn nanopulse(&mut self, inv: &Invocation, target: &str) -> EconResult<Outcome> {
        if target == inv.user {
            return Err(GuardReason::SelfTarget.into());
        }
        let mut sender = self.account(&inv.user)?;
        let mut receiver = self.account(target)?;
        let enterprise = self.store.enterprise(&inv.user)?;
        self.refresh_quests(&mut sender, enterprise.as_ref().map(|e| e.industry), inv.now);

        let today = clock::utc_day(inv.now);
        let outcome = actions::nanopulse(&self.config, &mut sender, &mut receiver, today)?;
        let events = [ProgressEvent::new(ProgressKey::NanopulseCount, 1)];
        let quests = self.settle_quests(&mut sender, inv.now, &events);
        self.store.put_account(&inv.user, &sender)?;
        self.store.put_account(target, &receiver)?;
        Ok(Outcome::Nanopulse { outcome, quests })
    }

    // ── Items and buffs ────────────────────────────────────────

    pub fn use_item(&mut self, inv: &Invocation, item_name: &str) -> EconResult<Outcome> {
        let item = ItemKind::from_name(item_name)
            .ok_or_else(|| EconError::validation(format!("unknown item: {item_name}")))?;
        let mut account = self.account(&inv.user)?;
        let outcome = actions::use_item(&self.config, &mut account, item, inv.now)?;
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::ItemUsed(outcome))
    }

    pub fn inventory(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let account = self.account(&inv.user)?;
        let items = account
            .inventory
            .iter()
            .map(|(&item, &count)| InventoryEntry { item, count })
            .collect();
        // Expired entries are logically absent even before a mutating
        // query prunes them.
        let active = account
            .buffs
            .iter()
            .filter(|(_, &end)| inv.now <= end)
            .map(|(&item, &end)| ActiveBuffView { item, expires_at: end })
            .collect();
        Ok(Outcome::Inventory { items, buffs: active })
    }

    // ── Enterprise ─────────────────────────────────────────────

    pub fn industries(&self) -> Outcome {
        let views = Industry::ALL
            .iter()
            .map(|industry| {
                let spec = industry.spec();
                IndustryView {
                    name: industry.name().to_string(),
                    profit_mult: spec.profit_mult,
                    work_mult: spec.work_mult,
                    crime_mult: spec.crime_mult,
                    focus: spec.focus.to_string(),
                    vibe: spec.vibe.to_string(),
                }
            })
            .collect();
        Outcome::Industries(views)
    }

    pub fn start_enterprise(
        &mut self,
        inv: &Invocation,
        name: &str,
        industry_name: &str,
    ) -> EconResult<Outcome> {
        let industry = Industry::from_name(industry_name)
            .ok_or_else(|| EconError::validation(format!("unknown industry: {industry_name}")))?;
        if name.trim().is_empty() {
            return Err(EconError::validation("enterprise name must not be empty"));
        }
        if self.store.enterprise(&inv.user)?.is_some() {
            return Err(GuardReason::EnterpriseExists.into());
        }
        let mut account = self.account(&inv.user)?;
        let enterprise = progression::found_enterprise(
            &self.config,
            &mut account,
            name.trim().to_string(),
            industry,
            inv.now,
        )?;
        self.store.put_account(&inv.user, &account)?;
        self.store.put_enterprise(&inv.user, &enterprise)?;
        log::info!("{} founded '{}' ({industry})", inv.user, enterprise.name);
        Ok(Outcome::EnterpriseFounded {
            status: Self::status_view(&enterprise, inv.now),
            wallet: account.wallet,
        })
    }

    pub fn enterprise_status(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let enterprise = self
            .store
            .enterprise(&inv.user)?
            .ok_or(GuardReason::NoEnterprise)?;
        Ok(Outcome::Enterprise(Self::status_view(&enterprise, inv.now)))
    }

    fn status_view(enterprise: &Enterprise, now: EpochSecs) -> EnterpriseStatus {
        let next_tier = (enterprise.tier < catalog::TERMINAL_TIER).then(|| {
            let spec = &catalog::TIERS[enterprise.tier + 1];
            NextTierView {
                name: spec.name.to_string(),
                invest_cost: spec.invest_cost.unwrap_or(0),
                success_rate: spec.success_rate,
                profit_needed: spec.profit_needed,
            }
        });
        EnterpriseStatus {
            name: enterprise.name.clone(),
            industry: enterprise.industry.name().to_string(),
            tier: enterprise.tier,
            tier_name: catalog::TIERS[enterprise.tier].name.to_string(),
            current_profit: progression::current_profit_rate(enterprise, now),
            work_bonus: enterprise.work_bonus,
            crime_bonus: enterprise.crime_bonus,
            profit_earned: enterprise.profit_earned,
            overclocked: enterprise.overclocked(now),
            crashed: enterprise.crashed(now),
            next_tier,
        }
    }

    pub fn invest(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut enterprise = self
            .store
            .enterprise(&inv.user)?
            .ok_or(GuardReason::NoEnterprise)?;
        let mut account = self.account(&inv.user)?;
        self.refresh_quests(&mut account, Some(enterprise.industry), inv.now);

        let outcome =
            progression::invest(&self.config, &mut account, &mut enterprise, &mut self.rng)?;
        // Only a successful advancement counts as quest progress; a
        // failed roll is a sunk cost, not an achievement.
        let mut events = Vec::new();
        if outcome.success {
            events.push(ProgressEvent::new(ProgressKey::InvestCount, 1));
            events.push(ProgressEvent::new(ProgressKey::TierLevel, enterprise.tier as i64));
        }
        let quests = self.settle_quests(&mut account, inv.now, &events);
        self.store.put_account(&inv.user, &account)?;
        self.store.put_enterprise(&inv.user, &enterprise)?;
        Ok(Outcome::Invest { outcome, quests })
    }

    pub fn overclock(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut enterprise = self
            .store
            .enterprise(&inv.user)?
            .ok_or(GuardReason::NoEnterprise)?;
        let mut account = self.account(&inv.user)?;
        let outcome = progression::overclock(
            &self.config,
            &mut account,
            &mut enterprise,
            inv.now,
            &mut self.rng,
        )?;
        self.store.put_account(&inv.user, &account)?;
        self.store.put_enterprise(&inv.user, &enterprise)?;
        Ok(Outcome::Overclock(outcome))
    }

    pub fn claim_bonus(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        if self.store.enterprise(&inv.user)?.is_none() {
            return Err(GuardReason::NoEnterprise.into());
        }
        let pool = self.store.tax_pool()?;
        if pool <= 0 {
            return Err(GuardReason::TaxPoolEmpty.into());
        }
        let bonus = (pool / self.config.bonus_pool_divisor).min(self.config.bonus_cap);
        if bonus <= 0 {
            return Err(GuardReason::TaxPoolEmpty.into());
        }
        let mut account = self.account(&inv.user)?;
        account.credit(bonus);
        self.store.set_tax_pool(pool - bonus)?;
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Bonus(BonusOutcome {
            bonus,
            pool_remaining: pool - bonus,
            wallet: account.wallet,
        }))
    }

    // ── Quest views ────────────────────────────────────────────

    pub fn challenges(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let mut account = self.account(&inv.user)?;
        let enterprise = self.store.enterprise(&inv.user)?;
        self.refresh_quests(&mut account, enterprise.as_ref().map(|e| e.industry), inv.now);
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Challenges(account.challenges))
    }

    pub fn contracts(&mut self, inv: &Invocation) -> EconResult<Outcome> {
        let enterprise = self
            .store
            .enterprise(&inv.user)?
            .ok_or(GuardReason::NoEnterprise)?;
        let mut account = self.account(&inv.user)?;
        self.refresh_quests(&mut account, Some(enterprise.industry), inv.now);
        self.store.put_account(&inv.user, &account)?;
        Ok(Outcome::Contracts(account.contracts))
    }

    // ── Leaderboard and guild setup ────────────────────────────

    pub fn top(&mut self, count: usize) -> EconResult<Outcome> {
        let count = count.clamp(1, 25);
        let rows = self
            .store
            .top_accounts(count)?
            .into_iter()
            .map(|(user, account)| {
                let net_worth = account.net_worth();
                LeaderboardRow {
                    user,
                    net_worth,
                    title: catalog::title_for(net_worth).to_string(),
                }
            })
            .collect();
        Ok(Outcome::Top(rows))
    }

    pub fn setup_updates(&mut self, inv: &Invocation, channel_id: &str) -> EconResult<Outcome> {
        self.store.set_updates_channel(&inv.guild, channel_id)?;
        log::info!("guild {} updates channel set to {}", inv.guild, channel_id);
        Ok(Outcome::UpdatesConfigured { channel_id: channel_id.to_string() })
    }

    pub fn help(&self) -> Outcome {
        let topics = [
            ("funds", "Show wallet, bank, net worth and title"),
            ("deposit", "Move zentrons from wallet to bank"),
            ("withdraw", "Move zentrons from bank to wallet"),
            ("transfer", "Send zentrons to another player"),
            ("work", "Earn zentrons (5 minute cooldown)"),
            ("crime", "Risky score, may backfire (15 minute cooldown)"),
            ("rob", "Try to rob another player's wallet (1 hour cooldown)"),
            ("daily", "Claim the daily streak bonus"),
            ("use_item", "Consume an item to activate its buff"),
            ("inventory", "List held items and active buffs"),
            ("industries", "Compare the five enterprise industries"),
            ("start_enterprise", "Found an enterprise (one per player)"),
            ("enterprise", "Show your enterprise's status"),
            ("invest", "Gamble on advancing your enterprise a tier"),
            ("overclock", "Stake 10% of wallet for triple profit"),
            ("challenges", "Show today's daily challenges"),
            ("contracts", "Show your industry contracts"),
            ("nanopulse", "Gift a small pulse of zentrons (3/day)"),
            ("claim_bonus", "Claim a cut of the community tax pool"),
            ("top", "Net-worth leaderboard"),
            ("setup_updates", "Set the channel for world updates"),
        ];
        Outcome::Help(
            topics
                .iter()
                .map(|(command, summary)| HelpTopic {
                    command: command.to_string(),
                    summary: summary.to_string(),
                })
                .collect(),
        )
    }

    // ── Dispatch ───────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command, inv: &Invocation) -> EconResult<Outcome> {
        match command {
            Command::Funds => Ok(Outcome::Funds(self.funds(inv)?)),
            Command::Deposit { amount } => {
                Ok(Outcome::Bank(self.bank(inv, BankOp::Deposit, amount)?))
            }
            Command::Withdraw { amount } => {
                Ok(Outcome::Bank(self.bank(inv, BankOp::Withdraw, amount)?))
            }
            Command::Transfer { target, amount } => self.transfer(inv, &target, amount),
            Command::Work => self.work(inv),
            Command::Crime => self.crime(inv),
            Command::Rob { target } => self.rob(inv, &target),
            Command::Daily => self.daily(inv),
            Command::UseItem { item } => self.use_item(inv, &item),
            Command::Inventory => self.inventory(inv),
            Command::Industries => Ok(self.industries()),
            Command::StartEnterprise { name, industry } => {
                self.start_enterprise(inv, &name, &industry)
            }
            Command::Enterprise => self.enterprise_status(inv),
            Command::Invest => self.invest(inv),
            Command::Overclock => self.overclock(inv),
            Command::Challenges => self.challenges(inv),
            Command::Contracts => self.contracts(inv),
            Command::Nanopulse { target } => self.nanopulse(inv, &target),
            Command::ClaimBonus => self.claim_bonus(inv),
            Command::Top { count } => self.top(count),
            Command::SetupUpdates { channel_id } => self.setup_updates(inv, &channel_id),
            Command::Help => Ok(self.help()),
        }
    }
}
