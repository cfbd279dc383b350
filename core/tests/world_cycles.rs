//! Background world cycles: the profit tick with tax withholding, the
//! market shift's dip/rise alternation, and the guild surge.

use zentrix_core::{
    command::{Invocation, Outcome},
    config::GameConfig,
    engine::EconEngine,
    error::{EconError, GuardReason},
    store::EconStore,
    world::MarketDirection,
};

fn build_engine(config: GameConfig, seed: u64) -> EconEngine {
    let store = EconStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    EconEngine::new(config, store, seed)
}

fn inv(user: &str, now: i64) -> Invocation {
    Invocation { user: user.to_string(), guild: "guild-1".to_string(), now }
}

/// A profit tick pays the rate net of tax, grows profit_earned by the
/// same amount, and banks the withheld tax in the pool.
#[test]
fn profit_cycle_pays_and_taxes() {
    // A 40% rate makes the withholding visible at tier-0 rates.
    let config = GameConfig { tax_rate: 0.4, ..GameConfig::default() };
    let mut engine = build_engine(config, 1);
    let now = 1_000_000;
    engine
        .start_enterprise(&inv("alice", now), "Mill", "Cybernetics")
        .expect("founding"); // profit rate 15

    let report = engine.profit_cycle(now + 3600).expect("profit tick");
    assert_eq!(report.enterprises_paid, 1);
    assert_eq!(report.tax_collected, 6, "40% of 15");
    assert_eq!(report.total_paid, 9);

    let funds = engine.funds(&inv("alice", now + 3600)).expect("funds");
    assert_eq!(funds.wallet, 300 + 9);

    let status = engine.enterprise_status(&inv("alice", now + 3600)).expect("status");
    let Outcome::Enterprise(status) = status else {
        panic!("expected an enterprise status");
    };
    assert_eq!(status.profit_earned, 9);
}

/// Profit income routes into contract progress for the owner.
#[test]
fn profit_cycle_advances_profit_contracts() {
    let config = GameConfig { tax_rate: 0.0, ..GameConfig::default() };
    let mut engine = build_engine(config, 2);
    let now = 1_000_000;
    engine
        .start_enterprise(&inv("bob", now), "Farm", "Cybernetics")
        .expect("founding");
    // The daily claim pins the quest refresh date, so the contract set
    // sampled here survives the tick instead of being resampled.
    engine.daily(&inv("bob", now)).expect("daily claim");

    engine.profit_cycle(now + 3600).expect("profit tick");

    let result = engine.contracts(&inv("bob", now + 3600)).expect("contracts view");
    let Outcome::Contracts(contracts) = result else {
        panic!("expected contracts");
    };
    assert!(
        contracts.iter().any(|c| c.progress > 0),
        "a 15-zentron tick should advance the profit contract"
    );
}

/// Even UTC hours dip profit rates toward the floor of 5; odd hours
/// raise them by the same step.
#[test]
fn market_shift_dips_and_rises() {
    let mut engine = build_engine(GameConfig::default(), 3);
    let now = 1_000_000;
    engine
        .start_enterprise(&inv("carol", now), "Lab", "Cybernetics")
        .expect("founding"); // rate 15

    let even_hour = 7200; // 02:00 UTC on day zero
    let report = engine.market_shift(even_hour).expect("dip");
    assert_eq!(report.direction, MarketDirection::Dip);
    assert_eq!(report.enterprises_affected, 1);

    let rate = |engine: &mut EconEngine| {
        let Outcome::Enterprise(s) = engine.enterprise_status(&inv("carol", now)).expect("status")
        else {
            panic!("expected status");
        };
        s.current_profit
    };
    assert_eq!(rate(&mut engine), 10);

    // Three more dips: 10 -> 5 -> floor -> floor.
    for _ in 0..3 {
        engine.market_shift(even_hour).expect("dip");
    }
    assert_eq!(rate(&mut engine), 5, "the floor holds");

    let odd_hour = 3600; // 01:00 UTC
    let report = engine.market_shift(odd_hour).expect("rise");
    assert_eq!(report.direction, MarketDirection::Rise);
    assert_eq!(rate(&mut engine), 10);
}

/// A surge opens a bounded window with a known multiplier, and the
/// guild's live multiplier drops back to one when it closes.
#[test]
fn surge_window_and_expiry() {
    let mut engine = build_engine(GameConfig::default(), 4);
    let now = 1_000_000;

    let notice = engine.start_surge("guild-1", now).expect("surge");
    assert!(notice.multiplier == 2.0 || notice.multiplier == 3.0);
    assert!((now + 3600..=now + 7200).contains(&notice.until));

    let Outcome::Work { outcome, .. } =
        engine.work(&inv("erin", now + 10)).expect("work during surge")
    else {
        panic!("expected a work outcome");
    };
    assert_eq!(outcome.surge_multiplier, notice.multiplier);

    let Outcome::Work { outcome, .. } =
        engine.work(&inv("frank", notice.until + 1)).expect("work after surge")
    else {
        panic!("expected a work outcome");
    };
    assert_eq!(outcome.surge_multiplier, 1.0);
}

/// The tax-pool bonus pays a tenth of the pool capped at 50, and an
/// empty pool refuses the claim.
#[test]
fn claim_bonus_draws_down_the_pool() {
    let config = GameConfig { tax_rate: 0.4, ..GameConfig::default() };
    let mut engine = build_engine(config, 5);
    let now = 1_000_000;
    engine
        .start_enterprise(&inv("gina", now), "Mint", "Cybernetics")
        .expect("founding");

    let err = engine.claim_bonus(&inv("gina", now)).expect_err("pool starts empty");
    assert!(matches!(err, EconError::Guard(GuardReason::TaxPoolEmpty)));

    // 20 ticks at 6 tax each fills the pool to 120.
    for i in 1..=20 {
        engine.profit_cycle(now + i * 3600).expect("tick");
    }
    let result = engine.claim_bonus(&inv("gina", now)).expect("claim");
    let Outcome::Bonus(bonus) = result else {
        panic!("expected a bonus outcome");
    };
    assert_eq!(bonus.bonus, 12, "a tenth of the 120 pool");
    assert_eq!(bonus.pool_remaining, 108);
}

/// Players without an enterprise cannot tap the pool.
#[test]
fn claim_bonus_requires_an_enterprise() {
    let mut engine = build_engine(GameConfig::default(), 6);
    assert!(matches!(
        engine.claim_bonus(&inv("drifter", 1_000_000)),
        Err(EconError::Guard(GuardReason::NoEnterprise))
    ));
}
