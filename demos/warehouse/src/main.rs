//! warehouse: sorting run on a small single-level floor.
//!
//! Seeds objects, storages and agents from a JSON config (first argument) or
//! the built-in default, runs until every object is stored or the tick budget
//! is spent, and writes run statistics to `output/warehouse/`.
//!
//! ```text
//! RUST_LOG=wh=debug cargo run -p warehouse -- my_floor.json
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use memory_stats::memory_stats;
use tracing_subscriber::EnvFilter;

use wh_grid::TracingNotifier;
use wh_nav::BfsPathfinder;
use wh_output::{CsvWriter, StatsObserver};
use wh_sim::{WarehouseBuilder, WarehouseConfig};
use wh_task::StemClassifier;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR: &str = "output/warehouse";

// ── Memory helper ─────────────────────────────────────────────────────────────

fn mem_mb() -> f64 {
    memory_stats()
        .map(|s| s.physical_mem as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0)
}

fn load_config() -> Result<WarehouseConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(WarehouseConfig::default()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Config.
    let config = load_config()?;
    println!("=== warehouse: multi-agent sorting ===");
    println!(
        "Floor: {}  |  Storages: {}  |  Objects: {}  |  Agents: {}  |  Seed: {}",
        config.dimensions,
        config.storages.len(),
        config.object_count,
        config.agent_count,
        config.sim.seed,
    );
    println!("Categories: {}", config.categories.join(", "));
    println!();

    // 2. Seed the warehouse.
    let budget = config.sim.total_ticks;
    let mut wh = WarehouseBuilder::new(config, StemClassifier, BfsPathfinder)
        .notifier(TracingNotifier)
        .build()?;
    println!("Seeded {} objects, {} agents  (RSS {:.1} MB)", wh.seeded_objects, wh.agents.len(), mem_mb());

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = StatsObserver::new(writer);

    // 4. Run.
    let t0 = Instant::now();
    let sorted_at = wh.run_until_sorted(budget, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let census = wh.census();
    match sorted_at {
        Some(tick) => println!("Sorted at {tick} in {:.3} s", elapsed.as_secs_f64()),
        None => println!("Not sorted after {budget} ticks ({:.3} s)", elapsed.as_secs_f64()),
    }
    println!(
        "  floor {}  carried {}  stored {}  (RSS {:.1} MB)",
        census.floor, census.carried, census.stored, mem_mb(),
    );
    println!("  output written to {OUTPUT_DIR}/");
    println!();

    // 6. Per-agent table.
    println!("{:<8} {:<8} {:<8} {:<12}", "Agent", "Moves", "Stores", "Moves/store");
    println!("{}", "-".repeat(38));
    for s in wh.agent_stats() {
        let ratio = s.moves_per_store.map(|m| format!("{m:.2}")).unwrap_or_else(|| "-".into());
        println!("{:<8} {:<8} {:<8} {:<12}", s.agent.to_string(), s.moves, s.stores, ratio);
    }

    Ok(())
}
