//! bytepair CLI - Command-line interface for the GPT-2 / GPT-3 tokenizer.
//!
//! This is the main entry point for the `bytepair` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    BenchmarkCommand, BundleCommand, CountCommand, DecodeCommand, EncodeCommand, InspectCommand,
    TableArgs,
};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "bytepair")]
#[command(about = "GPT-2 / GPT-3 byte-level BPE tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    tables: TableArgs,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
    /// Count the tokens in a text
    Count(CountCommand),
    /// Show the token string behind every ID of an encoding
    Inspect(InspectCommand),
    /// Write the loaded tables as a single-file bundle or GPT-2 pair
    Bundle(BundleCommand),
    /// Benchmark encoding performance
    Benchmark(BenchmarkCommand),
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Warn,
        (0, 1) => LevelFilter::Info,
        (0, 2) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Error,
        _ => LevelFilter::Off,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd, &cli.tables)?,
        Commands::Decode(cmd) => commands::decode::run(cmd, &cli.tables)?,
        Commands::Count(cmd) => commands::count::run(cmd, &cli.tables)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd, &cli.tables)?,
        Commands::Bundle(cmd) => commands::bundle::run(cmd, &cli.tables)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd, &cli.tables)?,
    }

    Ok(())
}
