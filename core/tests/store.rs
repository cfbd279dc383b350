//! Store round-trips: get-or-create accounts, JSON record fidelity,
//! leaderboard ordering, and guild/world state.

use zentrix_core::{
    account::{Account, Enterprise},
    catalog::{Industry, ItemKind},
    store::EconStore,
};

fn open_store() -> EconStore {
    let store = EconStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

/// The first fetch creates and persists the default record; later
/// fetches see the same record, not a new one.
#[test]
fn account_get_or_create_is_stable() {
    let store = open_store();
    let first = store.account("alice", 500).expect("create");
    assert_eq!(first.wallet, 500);
    assert!(first.last_daily.is_none());

    let mut mutated = first.clone();
    mutated.wallet = 123;
    mutated.add_item(ItemKind::DarkCache, 2);
    store.put_account("alice", &mutated).expect("persist");

    let again = store.account("alice", 999).expect("fetch");
    assert_eq!(again, mutated, "starting wallet must not apply to existing records");
}

/// Every field of the account document survives a round trip.
#[test]
fn account_json_round_trip() {
    let store = open_store();
    let mut account = Account::fresh(500);
    account.bank = 250;
    account.last_work = 1_000_000;
    account.daily_streak = 4;
    account.add_item(ItemKind::NanoChip, 3);
    account.buffs.insert(ItemKind::SecureVault, 2_000_000);
    account.nanopulse_count = 2;

    store.put_account("bob", &account).expect("persist");
    let loaded = store.account("bob", 0).expect("fetch");
    assert_eq!(loaded, account);
}

#[test]
fn enterprise_absent_then_round_trips() {
    let store = open_store();
    assert!(store.enterprise("carol").expect("fetch").is_none());

    let enterprise = Enterprise {
        name: "Carol Corp".to_string(),
        industry: Industry::AiDynasties,
        tier: 2,
        profit: 55,
        work_bonus: 22,
        crime_bonus: 11,
        profit_earned: 4200,
        overclock_active: true,
        overclock_end: 1_003_600,
        crash_end: 0,
        created: 1_000_000,
    };
    store.put_enterprise("carol", &enterprise).expect("persist");
    assert_eq!(store.enterprise("carol").expect("fetch"), Some(enterprise));

    let all = store.all_enterprises().expect("sweep");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, "carol");
}

/// The leaderboard orders by wallet + bank, not wallet alone.
#[test]
fn leaderboard_orders_by_net_worth() {
    let store = open_store();
    let mut poor = Account::fresh(100);
    let mut rich = Account::fresh(50);
    rich.bank = 10_000;
    let mid = Account::fresh(2_000);
    poor.bank = 0;
    store.put_account("poor", &poor).expect("persist");
    store.put_account("rich", &rich).expect("persist");
    store.put_account("mid", &mid).expect("persist");

    let top = store.top_accounts(2).expect("leaderboard");
    let names: Vec<_> = top.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(names, ["rich", "mid"]);
}

#[test]
fn tax_pool_starts_empty() {
    let store = open_store();
    assert_eq!(store.tax_pool().expect("read"), 0);
    store.set_tax_pool(77).expect("write");
    assert_eq!(store.tax_pool().expect("read"), 77);
}

/// Setting the updates channel and opening a surge touch the same
/// guild row without clobbering each other.
#[test]
fn guild_config_fields_are_independent() {
    let store = open_store();
    assert!(store.updates_channel("g1").expect("read").is_none());

    store.set_updates_channel("g1", "chan-7").expect("write");
    store.activate_surge("g1", 1_007_200, 2.0).expect("surge");
    store.set_updates_channel("g1", "chan-8").expect("rewrite");

    assert_eq!(store.updates_channel("g1").expect("read").as_deref(), Some("chan-8"));
    assert_eq!(store.surge_multiplier("g1", 1_000_000).expect("read"), 2.0);
    assert_eq!(store.surge_multiplier("g1", 1_007_200).expect("read"), 1.0, "window closed");
    assert_eq!(store.all_guild_ids().expect("sweep"), ["g1"]);
}

/// Unknown guilds report the neutral multiplier.
#[test]
fn surge_defaults_to_one() {
    let store = open_store();
    assert_eq!(store.surge_multiplier("nowhere", 1_000_000).expect("read"), 1.0);
}
