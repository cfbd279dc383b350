//! Bank moves, peer transfers, and nanopulses.

use zentrix_core::{
    actions::BankOp,
    command::{Invocation, Outcome},
    config::GameConfig,
    engine::EconEngine,
    error::{EconError, GuardReason},
    store::EconStore,
};

fn build_engine(seed: u64) -> EconEngine {
    let store = EconStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    EconEngine::new(GameConfig::default(), store, seed)
}

fn inv(user: &str, now: i64) -> Invocation {
    Invocation { user: user.to_string(), guild: "guild-1".to_string(), now }
}

#[test]
fn deposit_then_withdraw_round_trips() {
    let mut engine = build_engine(1);
    let at = inv("alice", 1_000_000);

    let deposit = engine.bank(&at, BankOp::Deposit, 200).expect("deposit");
    assert_eq!(deposit.wallet, 300);
    assert_eq!(deposit.bank, 200);

    let withdraw = engine.bank(&at, BankOp::Withdraw, 50).expect("withdraw");
    assert_eq!(withdraw.wallet, 350);
    assert_eq!(withdraw.bank, 150);
}

/// An overdraft rejects with both balances untouched.
#[test]
fn overdraft_rejects_unchanged() {
    let mut engine = build_engine(2);
    let at = inv("bob", 1_000_000);

    let err = engine.bank(&at, BankOp::Deposit, 600).expect_err("over wallet");
    assert!(matches!(
        err,
        EconError::Guard(GuardReason::InsufficientWallet { have: 500, need: 600 })
    ));

    let err = engine.bank(&at, BankOp::Withdraw, 1).expect_err("empty bank");
    assert!(matches!(
        err,
        EconError::Guard(GuardReason::InsufficientBank { have: 0, need: 1 })
    ));

    let funds = engine.funds(&at).expect("funds view");
    assert_eq!(funds.wallet, 500);
    assert_eq!(funds.bank, 0);
}

#[test]
fn non_positive_amounts_are_validation_errors() {
    let mut engine = build_engine(3);
    let at = inv("carol", 1_000_000);

    assert!(matches!(
        engine.bank(&at, BankOp::Deposit, 0),
        Err(EconError::Validation { .. })
    ));
    assert!(matches!(
        engine.transfer(&at, "dave", -5),
        Err(EconError::Validation { .. })
    ));
}

#[test]
fn transfer_moves_funds_between_wallets() {
    let mut engine = build_engine(4);
    let at = inv("sender", 1_000_000);

    let result = engine.transfer(&at, "receiver", 150).expect("transfer");
    let Outcome::Transferred { wallet, .. } = result else {
        panic!("expected a transfer outcome");
    };
    assert_eq!(wallet, 350);

    let receiver = engine.funds(&inv("receiver", 1_000_000)).expect("receiver funds");
    assert_eq!(receiver.wallet, 650);
}

#[test]
fn transfer_to_self_rejected() {
    let mut engine = build_engine(5);
    let at = inv("echo", 1_000_000);
    assert!(matches!(
        engine.transfer(&at, "echo", 10),
        Err(EconError::Guard(GuardReason::SelfTarget))
    ));
}

/// Three pulses a day, then the cap; the counter resets on the next
/// UTC day.
#[test]
fn nanopulse_daily_cap_and_reset() {
    let mut engine = build_engine(6);
    let day1 = 1_000_000;

    for _ in 0..3 {
        engine.nanopulse(&inv("sender", day1), "friend").expect("pulse under cap");
    }
    let err = engine.nanopulse(&inv("sender", day1), "friend").expect_err("cap");
    assert!(matches!(
        err,
        EconError::Guard(GuardReason::PulseLimitReached { limit: 3 })
    ));

    let friend = engine.funds(&inv("friend", day1)).expect("friend funds");
    assert_eq!(friend.wallet, 500 + 3 * 10);

    // Next UTC day the counter starts over.
    let day2 = day1 + 86_400;
    engine.nanopulse(&inv("sender", day2), "friend").expect("fresh daily counter");
}

#[test]
fn nanopulse_to_self_rejected() {
    let mut engine = build_engine(7);
    assert!(matches!(
        engine.nanopulse(&inv("solo", 1_000_000), "solo"),
        Err(EconError::Guard(GuardReason::SelfTarget))
    ));
}
