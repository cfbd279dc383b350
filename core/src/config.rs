//! Tunable economy parameters.
//!
//! `GameConfig::default()` carries the canonical live values; a
//! deployment can override any subset from a JSON file. The static
//! catalogs (tiers, industries, buffs, quests) live in catalog.rs —
//! they are game content, not tuning knobs.

use crate::{
    error::{EconError, EconResult},
    types::Zentrons,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Wallet balance a brand-new account starts with.
    pub starting_wallet: Zentrons,
    /// One-time cost of founding an enterprise.
    pub enterprise_cost: Zentrons,
    /// Fraction of every profit tick withheld into the tax pool.
    pub tax_rate: f64,

    // ── Cooldowns (seconds) ────────────────────────────────────
    pub work_cooldown: i64,
    pub crime_cooldown: i64,
    pub rob_cooldown: i64,
    pub buff_cooldown: i64,

    // ── Work ───────────────────────────────────────────────────
    pub work_base_min: Zentrons,
    pub work_base_max: Zentrons,
    pub work_drop_chance: f64,

    // ── Crime ──────────────────────────────────────────────────
    pub crime_drop_chance: f64,

    // ── Rob ────────────────────────────────────────────────────
    /// Targets below this wallet balance cannot be robbed.
    pub rob_minimum_target: Zentrons,
    pub rob_success_chance: f64,
    /// Fraction of the victim's wallet taken on success, drawn
    /// uniformly from [min, max).
    pub rob_take_min: f64,
    pub rob_take_max: f64,
    /// Fraction of the robber's own wallet fined on failure.
    pub rob_fine_fraction: f64,

    // ── Daily / nanopulse ──────────────────────────────────────
    pub daily_base: Zentrons,
    pub daily_cap: Zentrons,
    pub nanopulse_limit: u32,
    pub nanopulse_reward: Zentrons,

    // ── Progression ────────────────────────────────────────────
    pub invest_jackpot_chance: f64,
    pub invest_drop_chance: f64,
    pub overclock_stake_fraction: f64,
    pub overclock_stake_minimum: Zentrons,
    pub overclock_crash_chance: f64,
    pub overclock_duration_secs: i64,
    pub crash_duration_secs: i64,

    // ── Quests ─────────────────────────────────────────────────
    /// Completion window for an industry contract, from its start.
    pub contract_window_secs: i64,
    pub active_quest_count: usize,

    // ── World ──────────────────────────────────────────────────
    /// Step and floor for the market shift's profit perturbation.
    pub market_shift_step: Zentrons,
    pub market_profit_floor: Zentrons,
    pub surge_duration_min_secs: i64,
    pub surge_duration_max_secs: i64,
    pub surge_multiplier: f64,
    pub surge_big_multiplier: f64,
    pub surge_big_chance: f64,

    // ── Tax pool bonus ─────────────────────────────────────────
    pub bonus_pool_divisor: Zentrons,
    pub bonus_cap: Zentrons,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_wallet: 500,
            enterprise_cost: 200,
            tax_rate: 0.05,
            work_cooldown: 300,
            crime_cooldown: 900,
            rob_cooldown: 3600,
            buff_cooldown: 3600,
            work_base_min: 10,
            work_base_max: 30,
            work_drop_chance: 0.05,
            crime_drop_chance: 0.10,
            rob_minimum_target: 100,
            rob_success_chance: 0.5,
            rob_take_min: 0.05,
            rob_take_max: 0.20,
            rob_fine_fraction: 0.25,
            daily_base: 50,
            daily_cap: 500,
            nanopulse_limit: 3,
            nanopulse_reward: 10,
            invest_jackpot_chance: 0.03,
            invest_drop_chance: 0.05,
            overclock_stake_fraction: 0.10,
            overclock_stake_minimum: 100,
            overclock_crash_chance: 0.20,
            overclock_duration_secs: 3600,
            crash_duration_secs: 7200,
            contract_window_secs: 21_600,
            active_quest_count: 3,
            market_shift_step: 5,
            market_profit_floor: 5,
            surge_duration_min_secs: 3600,
            surge_duration_max_secs: 7200,
            surge_multiplier: 2.0,
            surge_big_multiplier: 3.0,
            surge_big_chance: 0.05,
            bonus_pool_divisor: 10,
            bonus_cap: 50,
        }
    }
}

impl GameConfig {
    /// Load overrides from a JSON file; absent fields keep defaults.
    pub fn from_json_file(path: &str) -> EconResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EconError::validation(format!("config file {path}: {e}")))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
