//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser, Debug)]
pub struct BenchmarkCommand {
    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,

    /// Encode the file line by line with the parallel batch API
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

use super::TableArgs;
use anyhow::{ensure, Context, Result as AnyhowResult};
use std::fs;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand, tables: &TableArgs) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "--iterations must be at least 1");

    let tokenizer = tables.load()?;
    let text =
        fs::read_to_string(&cmd.input).with_context(|| format!("failed to read {}", cmd.input))?;
    let lines: Vec<&str> = text.lines().collect();

    let encode = || -> usize {
        if cmd.batch {
            tokenizer.encode_batch(&lines).iter().map(Vec::len).sum()
        } else {
            tokenizer.encode(&text).len()
        }
    };

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!("  Mode: {}", if cmd.batch { "batch" } else { "single" });
    println!();

    // Warmup
    let tokens = encode();

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        encode();
    }
    let elapsed = start.elapsed();

    let avg_time_ms = elapsed.as_secs_f64() * 1000.0 / cmd.iterations as f64;
    let total_tokens = tokens * cmd.iterations;

    println!("Results:");
    println!("  Tokens per pass: {}", tokens);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_time_ms);
    println!(
        "  Throughput: {:.0} tokens/s, {:.2} MB/s",
        total_tokens as f64 / elapsed.as_secs_f64(),
        (text.len() * cmd.iterations) as f64 / elapsed.as_secs_f64() / 1_000_000.0
    );

    if let Some(stats) = tokenizer.cache_stats() {
        println!(
            "  Cache: {}/{} entries, hit rate {:.1}%",
            stats.entries,
            stats.capacity,
            stats.hit_rate.unwrap_or(0.0) * 100.0
        );
    }

    Ok(())
}
