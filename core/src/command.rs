//! The wire-level command surface: one `Command` variant per player
//! action, one `Outcome` variant per structured result payload.
//!
//! RULE: Outcomes carry data, never prose. Rendering (message text,
//! embeds, formatting) belongs to the delivery layer of whatever front
//! end drives the engine.

use crate::{
    actions::{
        BankOutcome, CrimeOutcome, DailyOutcome, NanopulseOutcome, RobOutcome, UseOutcome,
        WorkOutcome,
    },
    account::{ChallengeInstance, ContractInstance},
    catalog::ItemKind,
    progression::{InvestOutcome, OverclockOutcome},
    quests::QuestPayout,
    types::{EpochSecs, GuildId, UserId, Zentrons},
};
use serde::{Deserialize, Serialize};

/// Who is acting, from where, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub user: UserId,
    pub guild: GuildId,
    pub now: EpochSecs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    Funds,
    Deposit { amount: Zentrons },
    Withdraw { amount: Zentrons },
    Transfer { target: UserId, amount: Zentrons },
    Work,
    Crime,
    Rob { target: UserId },
    Daily,
    UseItem { item: String },
    Inventory,
    Industries,
    StartEnterprise { name: String, industry: String },
    Enterprise,
    Invest,
    Overclock,
    Challenges,
    Contracts,
    Nanopulse { target: UserId },
    ClaimBonus,
    Top { count: usize },
    SetupUpdates { channel_id: String },
    Help,
}

// ── Result payloads ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundsView {
    pub wallet: Zentrons,
    pub bank: Zentrons,
    pub net_worth: Zentrons,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: ItemKind,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveBuffView {
    pub item: ItemKind,
    pub expires_at: EpochSecs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryView {
    pub name: String,
    pub profit_mult: f64,
    pub work_mult: f64,
    pub crime_mult: f64,
    pub focus: String,
    pub vibe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextTierView {
    pub name: String,
    pub invest_cost: Zentrons,
    pub success_rate: f64,
    pub profit_needed: Zentrons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseStatus {
    pub name: String,
    pub industry: String,
    pub tier: usize,
    pub tier_name: String,
    /// Hourly rate with any live overclock/crash applied.
    pub current_profit: Zentrons,
    pub work_bonus: Zentrons,
    pub crime_bonus: Zentrons,
    pub profit_earned: Zentrons,
    pub overclocked: bool,
    pub crashed: bool,
    /// None at the terminal tier.
    pub next_tier: Option<NextTierView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user: UserId,
    pub net_worth: Zentrons,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusOutcome {
    pub bonus: Zentrons,
    pub pool_remaining: Zentrons,
    pub wallet: Zentrons,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpTopic {
    pub command: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Funds(FundsView),
    Bank(BankOutcome),
    Transferred { target: UserId, amount: Zentrons, wallet: Zentrons },
    Work { outcome: WorkOutcome, quests: Vec<QuestPayout> },
    Crime { outcome: CrimeOutcome, quests: Vec<QuestPayout> },
    Rob(RobOutcome),
    Daily { outcome: DailyOutcome, quests: Vec<QuestPayout> },
    ItemUsed(UseOutcome),
    Inventory { items: Vec<InventoryEntry>, buffs: Vec<ActiveBuffView> },
    Industries(Vec<IndustryView>),
    EnterpriseFounded { status: EnterpriseStatus, wallet: Zentrons },
    Enterprise(EnterpriseStatus),
    Invest { outcome: InvestOutcome, quests: Vec<QuestPayout> },
    Overclock(OverclockOutcome),
    Challenges(Vec<ChallengeInstance>),
    Contracts(Vec<ContractInstance>),
    Nanopulse { outcome: NanopulseOutcome, quests: Vec<QuestPayout> },
    Bonus(BonusOutcome),
    Top(Vec<LeaderboardRow>),
    UpdatesConfigured { channel_id: String },
    Help(Vec<HelpTopic>),
}
