//! Buff engine: effective multipliers and the anti-rob shield.
//!
//! Expiry is observed lazily: every query sweeps the buff map and
//! prunes entries past their expiry. There is no background sweep —
//! callers persist the pruned account as part of their own write.

use crate::{
    account::Account,
    catalog::{BuffCategory, ItemKind},
    types::EpochSecs,
};

/// Multiplier for income of `category` given the account's active
/// buffs. Stacking is multiplicative; 1.0 when nothing applies.
pub fn effective_multiplier(account: &mut Account, category: BuffCategory, now: EpochSecs) -> f64 {
    let mut multiplier = 1.0;
    prune_expired(account, now);
    for item in account.buffs.keys() {
        let spec = item.buff();
        if spec.category.applies_to(category) {
            multiplier *= spec.multiplier;
        }
    }
    multiplier
}

/// Whether a rob-blocking buff is currently active. Sweeps expired
/// entries as a side effect, same as the multiplier query.
pub fn anti_rob_active(account: &mut Account, now: EpochSecs) -> bool {
    prune_expired(account, now);
    account
        .buffs
        .keys()
        .any(|item| item.buff().category == BuffCategory::AntiRob)
}

fn prune_expired(account: &mut Account, now: EpochSecs) {
    account.buffs.retain(|_, end| now <= *end);
}

/// Activate `item`'s buff, stamping its expiry. Re-using an item
/// already active restarts the window rather than stacking a copy.
pub fn activate(account: &mut Account, item: ItemKind, now: EpochSecs) -> EpochSecs {
    let expiry = now + item.buff().duration_secs;
    account.buffs.insert(item, expiry);
    expiry
}
