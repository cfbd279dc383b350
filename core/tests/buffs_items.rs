//! Buff stacking, lazy expiry, and the item-use action.

use zentrix_core::{
    account::Account,
    actions,
    buffs,
    catalog::{BuffCategory, ItemKind},
    config::GameConfig,
    error::{EconError, GuardReason},
};

/// Stacking is multiplicative: a Work buff (1.25) under a Dark Cache
/// all-income buff (2.0) yields 2.5 on work income.
#[test]
fn buffs_stack_multiplicatively() {
    let mut account = Account::fresh(500);
    let now = 1_000_000;
    buffs::activate(&mut account, ItemKind::NanoChip, now);
    buffs::activate(&mut account, ItemKind::DarkCache, now);

    let work = buffs::effective_multiplier(&mut account, BuffCategory::Work, now);
    assert!((work - 2.5).abs() < 1e-9, "got {work}");

    // The Work buff does not touch crime income; the all buff does.
    let crime = buffs::effective_multiplier(&mut account, BuffCategory::Crime, now);
    assert!((crime - 2.0).abs() < 1e-9, "got {crime}");
}

/// Expired entries are pruned on query and contribute nothing.
#[test]
fn expired_buffs_are_pruned_lazily() {
    let mut account = Account::fresh(500);
    let now = 1_000_000;
    buffs::activate(&mut account, ItemKind::NanoChip, now); // 1 h duration

    let later = now + 3601;
    let mult = buffs::effective_multiplier(&mut account, BuffCategory::Work, later);
    assert_eq!(mult, 1.0);
    assert!(account.buffs.is_empty(), "query should have swept the expired entry");
}

/// Re-using an active buff restarts its window instead of stacking.
#[test]
fn reactivation_restarts_the_window() {
    let mut account = Account::fresh(500);
    buffs::activate(&mut account, ItemKind::NanoChip, 1_000_000);
    let expiry = buffs::activate(&mut account, ItemKind::NanoChip, 1_002_000);
    assert_eq!(expiry, 1_002_000 + 3600);
    assert_eq!(account.buffs.len(), 1);
}

/// The shield flag follows the same lazy-expiry rule.
#[test]
fn anti_rob_flag_tracks_expiry() {
    let mut account = Account::fresh(500);
    let now = 1_000_000;
    buffs::activate(&mut account, ItemKind::SecureVault, now);
    assert!(buffs::anti_rob_active(&mut account, now + 100));
    assert!(!buffs::anti_rob_active(&mut account, now + 86_401));
}

/// `use_item` consumes exactly one copy, activates the buff, and
/// stamps the shared buff-use cooldown.
#[test]
fn use_item_consumes_and_gates() {
    let cfg = GameConfig::default();
    let mut account = Account::fresh(500);
    account.add_item(ItemKind::CryptoKey, 2);
    let now = 1_000_000;

    let outcome = actions::use_item(&cfg, &mut account, ItemKind::CryptoKey, now)
        .expect("first use");
    assert_eq!(outcome.category, BuffCategory::Crime);
    assert_eq!(outcome.expires_at, now + 3600);
    assert_eq!(account.inventory.get(&ItemKind::CryptoKey), Some(&1));

    let err = actions::use_item(&cfg, &mut account, ItemKind::CryptoKey, now + 100)
        .expect_err("buff cooldown");
    assert!(matches!(
        err,
        EconError::Guard(GuardReason::CooldownActive { remaining_secs: 3500 })
    ));
}

/// Items the player does not hold cannot be used; a zero count is
/// pruned, not kept.
#[test]
fn missing_item_rejected() {
    let cfg = GameConfig::default();
    let mut account = Account::fresh(500);
    account.add_item(ItemKind::TechRelic, 1);
    let now = 1_000_000;

    actions::use_item(&cfg, &mut account, ItemKind::TechRelic, now).expect("held item");
    assert!(account.inventory.is_empty(), "zero counts are pruned");

    let err = actions::use_item(&cfg, &mut account, ItemKind::TechRelic, now + 7200)
        .expect_err("no copies left");
    assert!(matches!(err, EconError::Guard(GuardReason::ItemNotHeld { .. })));
}
