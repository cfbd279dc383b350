//! Static game content: items, buffs, industries, the tier ladder,
//! and the challenge/contract templates.
//!
//! These tables are closed: the engine matches on the enums rather
//! than dispatching through string keys, so an unknown item or
//! industry can only enter through caller input, where it is rejected
//! as a validation error.

use crate::types::Zentrons;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Items and buffs ────────────────────────────────────────────────

/// Every rare item. All of them double as buff sources via `/use`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    NanoChip,
    TechRelic,
    CryptoKey,
    DarkCache,
    SecureVault,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::NanoChip,
        ItemKind::TechRelic,
        ItemKind::CryptoKey,
        ItemKind::DarkCache,
        ItemKind::SecureVault,
    ];

    /// Parse a player-facing item name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NanoChip => "NanoChip",
            Self::TechRelic => "Tech Relic",
            Self::CryptoKey => "Crypto Key",
            Self::DarkCache => "Dark Cache",
            Self::SecureVault => "Secure Vault",
        }
    }

    pub fn buff(&self) -> &'static BuffSpec {
        &BUFFS[*self as usize]
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Income category a buff applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffCategory {
    Work,
    Crime,
    Profit,
    /// Applies to every income category.
    All,
    /// No income effect; blocks robbery while active.
    AntiRob,
}

impl BuffCategory {
    /// Whether a buff of this category multiplies income of `wanted`.
    pub fn applies_to(&self, wanted: BuffCategory) -> bool {
        *self == wanted || *self == BuffCategory::All
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BuffSpec {
    pub multiplier: f64,
    pub duration_secs: i64,
    pub category: BuffCategory,
}

/// Indexed by `ItemKind as usize`.
const BUFFS: [BuffSpec; 5] = [
    BuffSpec { multiplier: 1.25, duration_secs: 3600, category: BuffCategory::Work },
    BuffSpec { multiplier: 1.5, duration_secs: 86_400, category: BuffCategory::Profit },
    BuffSpec { multiplier: 1.5, duration_secs: 3600, category: BuffCategory::Crime },
    BuffSpec { multiplier: 2.0, duration_secs: 43_200, category: BuffCategory::All },
    BuffSpec { multiplier: 1.0, duration_secs: 86_400, category: BuffCategory::AntiRob },
];

// ── Industries ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Cybernetics,
    QuantumComputing,
    Nanotech,
    DarkMatter,
    AiDynasties,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Cybernetics,
        Industry::QuantumComputing,
        Industry::Nanotech,
        Industry::DarkMatter,
        Industry::AiDynasties,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cybernetics => "Cybernetics",
            Self::QuantumComputing => "Quantum Computing",
            Self::Nanotech => "Nanotech",
            Self::DarkMatter => "Dark Matter",
            Self::AiDynasties => "AI Dynasties",
        }
    }

    pub fn spec(&self) -> &'static IndustrySpec {
        &INDUSTRIES[*self as usize]
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustrySpec {
    pub profit_mult: f64,
    pub work_mult: f64,
    pub crime_mult: f64,
    pub focus: &'static str,
    pub vibe: &'static str,
}

/// Indexed by `Industry as usize`.
const INDUSTRIES: [IndustrySpec; 5] = [
    IndustrySpec {
        profit_mult: 1.5, work_mult: 0.8, crime_mult: 1.0,
        focus: "Passive Income",
        vibe: "High-tech cash flow for chill tycoons",
    },
    IndustrySpec {
        profit_mult: 1.2, work_mult: 1.2, crime_mult: 1.2,
        focus: "Balanced Growth",
        vibe: "Smart tech for all-round players",
    },
    IndustrySpec {
        profit_mult: 1.0, work_mult: 1.5, crime_mult: 0.8,
        focus: "Work Grinding",
        vibe: "Nano-powered hustle for grind kings",
    },
    IndustrySpec {
        profit_mult: 0.8, work_mult: 1.0, crime_mult: 1.5,
        focus: "Crime Payouts",
        vibe: "Shady deals for risk junkies",
    },
    IndustrySpec {
        profit_mult: 1.1, work_mult: 1.1, crime_mult: 1.1,
        focus: "Steady Gains",
        vibe: "AI-driven wins for steady climbers",
    },
];

// ── Tier ladder ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct TierSpec {
    pub name: &'static str,
    pub profit: Zentrons,
    pub work_bonus: Zentrons,
    pub crime_bonus: Zentrons,
    /// None at the terminal tier: there is nothing left to buy.
    pub invest_cost: Option<Zentrons>,
    pub success_rate: f64,
    pub profit_needed: Zentrons,
}

pub const TIERS: [TierSpec; 7] = [
    TierSpec { name: "Side Hustle", profit: 10, work_bonus: 5, crime_bonus: 0,
               invest_cost: Some(200), success_rate: 0.75, profit_needed: 0 },
    TierSpec { name: "Startup", profit: 25, work_bonus: 10, crime_bonus: 5,
               invest_cost: Some(500), success_rate: 0.70, profit_needed: 1000 },
    TierSpec { name: "Firm", profit: 50, work_bonus: 20, crime_bonus: 10,
               invest_cost: Some(1000), success_rate: 0.65, profit_needed: 5000 },
    TierSpec { name: "Corp", profit: 100, work_bonus: 35, crime_bonus: 20,
               invest_cost: Some(2000), success_rate: 0.60, profit_needed: 15_000 },
    TierSpec { name: "Conglomerate", profit: 200, work_bonus: 50, crime_bonus: 35,
               invest_cost: Some(5000), success_rate: 0.55, profit_needed: 30_000 },
    TierSpec { name: "Empire", profit: 400, work_bonus: 75, crime_bonus: 50,
               invest_cost: Some(10_000), success_rate: 0.50, profit_needed: 60_000 },
    TierSpec { name: "Dynasty", profit: 750, work_bonus: 100, crime_bonus: 75,
               invest_cost: None, success_rate: 0.0, profit_needed: 0 },
];

pub const TERMINAL_TIER: usize = TIERS.len() - 1;

// ── Net-worth titles ───────────────────────────────────────────────

const TITLES: [(Zentrons, &str); 5] = [
    (25_000, "Overlord"),
    (10_000, "Zentron Lord"),
    (5_000, "Magnate"),
    (1_000, "Hustler"),
    (0, "Rookie"),
];

pub fn title_for(net_worth: Zentrons) -> &'static str {
    TITLES
        .iter()
        .find(|(threshold, _)| net_worth >= *threshold)
        .map(|(_, title)| *title)
        .unwrap_or("Rookie")
}

// ── Quest templates ────────────────────────────────────────────────

/// Tag an earn/count event carries so quest progress can be routed
/// to matching active challenges and contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKey {
    Earned,
    WorkCount,
    WorkEarned,
    CrimeCount,
    CrimeEarned,
    InvestCount,
    NanopulseCount,
    ProfitEarned,
    /// Absolute progress: set to the current tier, not accumulated.
    TierLevel,
    ChallengesCompleted,
}

impl ProgressKey {
    /// TierLevel reports an absolute level; everything else adds up.
    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::TierLevel)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChallengeSpec {
    pub task: &'static str,
    pub goal: i64,
    pub key: ProgressKey,
    pub reward: Zentrons,
}

pub const CHALLENGES: [ChallengeSpec; 5] = [
    ChallengeSpec { task: "Earn 500 Zentrons", goal: 500,
                    key: ProgressKey::Earned, reward: 100 },
    ChallengeSpec { task: "Use /work 5 times", goal: 5,
                    key: ProgressKey::WorkCount, reward: 75 },
    ChallengeSpec { task: "Use /crime 3 times", goal: 3,
                    key: ProgressKey::CrimeCount, reward: 50 },
    ChallengeSpec { task: "Invest in your enterprise", goal: 1,
                    key: ProgressKey::InvestCount, reward: 150 },
    ChallengeSpec { task: "Send 2 NanoPulses", goal: 2,
                    key: ProgressKey::NanopulseCount, reward: 60 },
];

#[derive(Debug, Clone, Copy)]
pub struct ContractSpec {
    pub task: &'static str,
    pub goal: i64,
    pub key: ProgressKey,
    pub reward: Zentrons,
    pub item: ItemKind,
}

pub fn contracts_for(industry: Industry) -> &'static [ContractSpec] {
    match industry {
        Industry::Cybernetics => &[
            ContractSpec { task: "Earn 2000 Zentrons from profit", goal: 2000,
                           key: ProgressKey::ProfitEarned, reward: 500, item: ItemKind::TechRelic },
            ContractSpec { task: "Reach tier 3", goal: 3,
                           key: ProgressKey::TierLevel, reward: 300, item: ItemKind::NanoChip },
        ],
        Industry::QuantumComputing => &[
            ContractSpec { task: "Complete 5 challenges", goal: 5,
                           key: ProgressKey::ChallengesCompleted, reward: 400, item: ItemKind::CryptoKey },
            ContractSpec { task: "Earn 1000 Zentrons total", goal: 1000,
                           key: ProgressKey::Earned, reward: 250, item: ItemKind::NanoChip },
        ],
        Industry::Nanotech => &[
            ContractSpec { task: "Use /work 10 times", goal: 10,
                           key: ProgressKey::WorkCount, reward: 350, item: ItemKind::NanoChip },
            ContractSpec { task: "Earn 1500 Zentrons from /work", goal: 1500,
                           key: ProgressKey::WorkEarned, reward: 400, item: ItemKind::TechRelic },
        ],
        Industry::DarkMatter => &[
            ContractSpec { task: "Earn 1000 Zentrons from /crime", goal: 1000,
                           key: ProgressKey::CrimeEarned, reward: 450, item: ItemKind::DarkCache },
            ContractSpec { task: "Use /crime 7 times", goal: 7,
                           key: ProgressKey::CrimeCount, reward: 300, item: ItemKind::CryptoKey },
        ],
        Industry::AiDynasties => &[
            ContractSpec { task: "Send 5 NanoPulses", goal: 5,
                           key: ProgressKey::NanopulseCount, reward: 350, item: ItemKind::NanoChip },
            ContractSpec { task: "Reach tier 4", goal: 4,
                           key: ProgressKey::TierLevel, reward: 400, item: ItemKind::TechRelic },
        ],
    }
}
