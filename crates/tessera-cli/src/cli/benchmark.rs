//! Benchmark command implementation.

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::Args;
use tessera::{render_tile, TileDescriptor, TileKind, DEFAULT_TILE_SIZE};

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Tile kind to time; every procedural kind when omitted
    #[arg(short = 'p', long = "pattern", value_name = "KIND")]
    pub kind: Option<TileKind>,

    /// Tile edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub size: u32,

    /// Renders per kind
    #[arg(short = 'n', long, default_value_t = 20)]
    pub runs: u32,
}

/// Timing for one kind.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub kind: TileKind,
    pub runs: u32,
    pub total: Duration,
}

impl BenchResult {
    pub fn avg_ms(&self) -> f64 {
        self.total.as_secs_f64() * 1000.0 / self.runs.max(1) as f64
    }
}

/// Render `kind` `runs` times from scratch, bypassing any cache.
pub fn time_kind(kind: TileKind, size: u32, runs: u32) -> Result<BenchResult> {
    let desc = TileDescriptor::new(kind, size);
    let start = Instant::now();
    for _ in 0..runs {
        render_tile(&desc)?;
    }
    Ok(BenchResult { kind, runs, total: start.elapsed() })
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &BenchArgs) -> Result<()> {
    ensure!(args.runs > 0, "Need at least one run");

    let kinds: Vec<TileKind> = match args.kind {
        Some(kind) => vec![kind],
        None => TileKind::procedural().collect(),
    };

    let start = Instant::now();
    let mut results = Vec::with_capacity(kinds.len());
    for kind in kinds {
        results.push(time_kind(kind, args.size, args.runs)?);
    }
    let elapsed = start.elapsed();

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  TILE BENCHMARK: {}px x {} runs", args.size, args.runs);
    println!("═══════════════════════════════════════════════");
    for r in &results {
        println!("  {:<20} {:>9.3}ms avg", r.kind.name(), r.avg_ms());
    }
    println!("───────────────────────────────────────────────");
    println!("  Kinds: {}", results.len());
    println!("  Time: {:?}", elapsed);
    println!("  Time (ms): {:.2}", elapsed.as_secs_f64() * 1000.0);
    println!("═══════════════════════════════════════════════");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_the_requested_runs() {
        let r = time_kind(TileKind::Checkered, 32, 3).unwrap();
        assert_eq!(r.runs, 3);
        assert!(r.avg_ms() >= 0.0);
    }

    #[test]
    fn zero_size_fails() {
        assert!(time_kind(TileKind::Checkered, 0, 1).is_err());
    }
}
