//! Error taxonomy for the economy core.
//!
//! RULE: No error here is fatal to the process. Each dispatched action
//! isolates its own failure, and background cycles log-and-continue
//! past a single bad record.

use crate::types::Zentrons;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EconError {
    /// Malformed input: bad action word, non-positive amount, unknown
    /// item or industry. Reported to the caller, no state change.
    #[error("invalid request: {reason}")]
    Validation { reason: String },

    /// A precondition check failed. Reported, no state change.
    #[error("{0}")]
    Guard(GuardReason),

    /// A threshold was not met. Depending on the action, a cost may
    /// already have been charged (overclock/invest charge up front).
    #[error("not eligible: {reason}")]
    NotEligible { reason: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Outward response still rate-limited after the retry envelope.
    #[error("delivery failed after {attempts} attempts (rate limited)")]
    Delivery { attempts: u32 },

    /// Non-rate-limit transport failure; propagated without retry.
    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Every guard that can reject an action before it mutates state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardReason {
    #[error("cooldown active: wait {remaining_secs}s")]
    CooldownActive { remaining_secs: i64 },

    #[error("not enough zentrons in wallet: have {have}, need {need}")]
    InsufficientWallet { have: Zentrons, need: Zentrons },

    #[error("not enough zentrons in bank: have {have}, need {need}")]
    InsufficientBank { have: Zentrons, need: Zentrons },

    #[error("you cannot target yourself")]
    SelfTarget,

    #[error("you already run an enterprise")]
    EnterpriseExists,

    #[error("you do not have an enterprise")]
    NoEnterprise,

    #[error("target wallet below the {minimum} zentron robbery floor")]
    TargetTooPoor { minimum: Zentrons },

    #[error("target has an active anti-rob shield")]
    TargetShielded,

    #[error("daily reward already claimed today")]
    DailyAlreadyClaimed,

    #[error("nanopulse limit of {limit} reached for today")]
    PulseLimitReached { limit: u32 },

    #[error("item not held: {item}")]
    ItemNotHeld { item: String },

    #[error("enterprise is already at the terminal tier")]
    TerminalTier,

    #[error("overclock already active: {remaining_secs}s left")]
    OverclockActive { remaining_secs: i64 },

    #[error("enterprise recovering from a crash: {remaining_secs}s left")]
    CrashRecovery { remaining_secs: i64 },

    #[error("the tax pool is empty")]
    TaxPoolEmpty,
}

pub type EconResult<T> = Result<T, EconError>;

impl EconError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    pub fn not_eligible(reason: impl Into<String>) -> Self {
        Self::NotEligible { reason: reason.into() }
    }
}

impl From<GuardReason> for EconError {
    fn from(reason: GuardReason) -> Self {
        Self::Guard(reason)
    }
}
