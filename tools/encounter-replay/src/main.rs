//! encounter-replay: run a seeded encounter headlessly with a scripted player.
//!
//! Usage:
//!   encounter-replay --level 4 --seed 7
//!   encounter-replay --level-file level.json --catalog pests.json --tick-ms 50

use std::path::{Path, PathBuf};
use std::process;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bloomguard_core::catalog::Catalog;
use bloomguard_core::config::LevelConfig;
use bloomguard_core::state::EncounterSnapshot;
use bloomguard_core::types::Position;
use bloomguard_procgen::generate_level;
use bloomguard_sim::{SimConfig, SimulationEngine};

/// Scripted player cadence.
const HIT_INTERVAL_MS: u64 = 250;
const SPRAY_INTERVAL_MS: u64 = 2000;
const HIT_DAMAGE: f64 = 25.0;

struct Args {
    level: u32,
    seed: u64,
    level_file: Option<PathBuf>,
    catalog: Option<PathBuf>,
    tick_ms: u64,
    max_secs: u64,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h" || a == "help") {
        print_usage();
        return;
    }
    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_usage();
            process::exit(1);
        }
    };

    let catalog = match &args.catalog {
        Some(path) => match read(path).and_then(|json| Catalog::from_json(&json).map_err(|e| e.to_string())) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading catalog {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };

    let level = match &args.level_file {
        Some(path) => match read(path).and_then(|json| LevelConfig::from_json(&json).map_err(|e| e.to_string())) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error loading level {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            generate_level(args.level, &catalog, &mut rng)
        }
    };

    let config = SimConfig {
        seed: args.seed,
        ..Default::default()
    };
    let mut engine = match SimulationEngine::new(config, level, catalog) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let limit_ms = args.max_secs * 1000;
    let mut next_hit = 0;
    let mut next_spray = 0;
    while engine.time().elapsed_ms < limit_ms {
        let snapshot = match engine.tick(args.tick_ms) {
            Ok(s) => s,
            Err(_) => break,
        };
        let now = snapshot.time.elapsed_ms;
        for power_up in &snapshot.power_ups {
            engine.collect_power_up(power_up.id);
        }
        if now >= next_hit {
            if let Some((id, _)) = nearest_target(&snapshot) {
                engine.apply_hit(id, HIT_DAMAGE);
            }
            next_hit = now + HIT_INTERVAL_MS;
        }
        if now >= next_spray {
            if let Some((_, position)) = nearest_target(&snapshot) {
                engine.spray(position);
            }
            next_spray = now + SPRAY_INTERVAL_MS;
        }
    }

    if !engine.phase().is_terminal() {
        warn!(max_secs = args.max_secs, "time limit reached, abandoning session");
    }
    let result = engine.end_session();
    info!(outcome = ?result.outcome, score = result.score, "replay finished");

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing result: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "encounter-replay: BLOOMGUARD headless encounter runner\n\
         \n\
           --level <N>          Level to generate (default: 1)\n\
           --seed <S>           RNG seed for generation and the session (default: 42)\n\
           --level-file <path>  Load a LevelConfig JSON instead of generating one\n\
           --catalog <path>     Load a catalog JSON instead of the built-in one\n\
           --tick-ms <MS>       Tick length (default: 100)\n\
           --max-secs <SECS>    Abandon the session after this long (default: 300)\n\
         \n\
         The session result is printed to stdout as JSON. Set RUST_LOG for logs.\n"
    );
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        level: 1,
        seed: 42,
        level_file: None,
        catalog: None,
        tick_ms: 100,
        max_secs: 300,
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--level" => parsed.level = parse_number(flag, value)?,
            "--seed" => parsed.seed = parse_number(flag, value)?,
            "--tick-ms" => parsed.tick_ms = parse_number(flag, value)?,
            "--max-secs" => parsed.max_secs = parse_number(flag, value)?,
            "--level-file" => parsed.level_file = Some(PathBuf::from(value)),
            "--catalog" => parsed.catalog = Some(PathBuf::from(value)),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 2;
    }
    if parsed.tick_ms == 0 {
        return Err("--tick-ms must be positive".to_string());
    }
    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {value}"))
}

fn read(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| e.to_string())
}

/// The boss if present, else the surfaced pest closest to the plant.
fn nearest_target(snapshot: &EncounterSnapshot) -> Option<(u32, Position)> {
    if let Some(boss) = &snapshot.boss {
        return Some((boss.id, boss.position));
    }
    let plant = Position::default();
    snapshot
        .pests
        .iter()
        .filter(|p| p.underground_until_ms.is_none())
        .min_by(|a, b| {
            a.position
                .ground_range_to(&plant)
                .total_cmp(&b.position.ground_range_to(&plant))
        })
        .map(|p| (p.id, p.position))
}
