//! zentrix-runner: headless front end for the Zentrix economy core.
//!
//! Usage:
//!   zentrix-runner --seed 12345 --db zentrix.db
//!   zentrix-runner --db zentrix.db --schedule
//!
//! Speaks JSON lines over stdin/stdout: each request line carries a
//! command envelope, each response line an outcome or error object.
//! With --schedule the background world cycles (profit, market shift,
//! surge) run on scheduler threads sharing the engine.

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zentrix_core::{
    command::{Command, Invocation},
    config::GameConfig,
    engine::EconEngine,
    rng::GameRng,
    scheduler::Scheduler,
    store::EconStore,
    types::EpochSecs,
};

#[derive(serde::Deserialize)]
struct Request {
    user: String,
    #[serde(default)]
    guild: String,
    /// Epoch seconds; omitted means the wall clock.
    #[serde(default)]
    now: Option<EpochSecs>,
    #[serde(flatten)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let schedule = args.iter().any(|a| a == "--schedule");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => GameConfig::from_json_file(&w[1])?,
        None => GameConfig::default(),
    };

    log::info!("zentrix-runner starting (seed {seed}, db {db})");

    let store = EconStore::open(db)?;
    store.migrate()?;
    let engine = Arc::new(Mutex::new(EconEngine::new(config, store, seed)));

    let mut scheduler = Scheduler::new();
    if schedule {
        spawn_world_cycles(&mut scheduler, &engine, seed);
    }

    run_ipc_loop(&engine)?;
    scheduler.stop();
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == name)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn wall_now() -> EpochSecs {
    chrono::Utc::now().timestamp()
}

fn spawn_world_cycles(scheduler: &mut Scheduler, engine: &Arc<Mutex<EconEngine>>, seed: u64) {
    const HOUR: u64 = 3600;
    const DAY: u64 = 24 * HOUR;

    let profit_engine = Arc::clone(engine);
    scheduler.spawn("profit-cycle", Duration::from_secs(HOUR), move || {
        if let Err(e) = profit_engine.lock().expect("engine mutex").profit_cycle(wall_now()) {
            log::error!("profit cycle failed: {e}");
        }
        Duration::from_secs(HOUR)
    });

    let market_engine = Arc::clone(engine);
    scheduler.spawn("market-shift", Duration::from_secs(DAY), move || {
        if let Err(e) = market_engine.lock().expect("engine mutex").market_shift(wall_now()) {
            log::error!("market shift failed: {e}");
        }
        Duration::from_secs(DAY)
    });

    // The surge interval is re-drawn every iteration; the interval
    // draw belongs to the runner, the surge itself to the engine.
    let surge_engine = Arc::clone(engine);
    let mut surge_rng = GameRng::seed_from(seed.wrapping_add(1));
    let first = surge_rng.range_i64(12 * HOUR as i64, 24 * HOUR as i64) as u64;
    scheduler.spawn("zentron-surge", Duration::from_secs(first), move || {
        if let Err(e) = surge_engine.lock().expect("engine mutex").zentron_surge(wall_now()) {
            log::error!("surge cycle failed: {e}");
        }
        let next = surge_rng.range_i64(12 * HOUR as i64, 24 * HOUR as i64) as u64;
        Duration::from_secs(next)
    });
}

fn run_ipc_loop(engine: &Arc<Mutex<EconEngine>>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        let inv = Invocation {
            user: request.user,
            guild: request.guild,
            now: request.now.unwrap_or_else(wall_now),
        };
        let response = {
            let mut engine = engine.lock().expect("engine mutex");
            match engine.dispatch(request.command, &inv) {
                Ok(outcome) => serde_json::json!({ "ok": outcome }),
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            }
        };
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }
    Ok(())
}
