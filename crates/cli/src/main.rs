//! Cache mapping simulator CLI.
//!
//! This binary is the text front end for `cachesim-core`. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then per-flag overrides.
//! 2. **Batch run:** Addresses given on the command line are accessed in order.
//! 3. **Interactive run:** Otherwise one address per stdin line until EOF or `q`.
//!
//! After every access the cache contents are listed, either as text or as JSON (`--json`).

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cachesim_core::cache::{AccessOutcome, AccessResult, CacheGeometry, CacheModel};
use cachesim_core::common::ConfigError;
use cachesim_core::config::{Config, MappingKind};
use cachesim_core::stats::CacheStats;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Cache mapping simulator (direct, set-associative, fully-associative)",
    long_about = "Simulate how a cache maps main-memory addresses to lines.\n\nSettings come from built-in defaults, then --config, then individual flags.\nWith addresses on the command line they are accessed in order; otherwise addresses are read from stdin, one per line, until EOF or 'q'.\n\nExamples:\n  cachesim --size 64 --block 16 --memory 1024 20 84\n  cachesim --mapping set --ways 2 0 32 64\n  cachesim --config cache.json --json"
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Main memory size in bytes.
    #[arg(short, long)]
    memory: Option<u64>,

    /// Cache size in bytes.
    #[arg(short, long)]
    size: Option<u64>,

    /// Block size in bytes.
    #[arg(short, long)]
    block: Option<u64>,

    /// Cache mapping type.
    #[arg(long, value_enum)]
    mapping: Option<Mapping>,

    /// Set size (blocks per set). Implies set-associative mapping unless --mapping is given.
    #[arg(short, long)]
    ways: Option<u64>,

    /// Print each result as a JSON object instead of a text listing.
    #[arg(long)]
    json: bool,

    /// Print hit/miss statistics before exiting.
    #[arg(long)]
    stats: bool,

    /// Log every access (overridden by RUST_LOG).
    #[arg(long)]
    trace: bool,

    /// Addresses to access, in order.
    #[arg(allow_negative_numbers = true, value_parser = parse_address_arg)]
    addresses: Vec<i64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mapping {
    /// Direct mapped.
    Direct,
    /// Set associative.
    Set,
    /// Fully associative.
    Full,
}

impl From<Mapping> for MappingKind {
    fn from(mapping: Mapping) -> Self {
        match mapping {
            Mapping::Direct => Self::Direct,
            Mapping::Set => Self::SetAssociative,
            Mapping::Full => Self::FullyAssociative,
        }
    }
}

/// Final JSON record emitted with `--json --stats`.
#[derive(Serialize)]
struct Summary<'a> {
    geometry: &'a CacheGeometry,
    stats: &'a CacheStats,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let mut cache = match CacheModel::from_config(&config) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &mut cache) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to errors only.
fn init_tracing(trace: bool) {
    let default = if trace { "info" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Layers defaults, the optional config file, and command-line overrides.
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(bytes) = cli.memory {
        config.memory.main_memory_bytes = bytes;
    }
    if let Some(bytes) = cli.size {
        config.cache.size_bytes = bytes;
    }
    if let Some(bytes) = cli.block {
        config.cache.block_bytes = bytes;
    }
    if let Some(ways) = cli.ways {
        config.cache.ways = ways;
        config.cache.mapping = MappingKind::SetAssociative;
    }
    if let Some(mapping) = cli.mapping {
        config.cache.mapping = mapping.into();
    }
    if cli.trace {
        config.general.trace_accesses = true;
    }
    Ok(config)
}

/// Feeds addresses to the cache from the command line or stdin.
fn run(cli: &Cli, cache: &mut CacheModel) -> io::Result<()> {
    let mut out = io::stdout().lock();

    if !cli.json {
        print_header(&mut out, cache.geometry())?;
    }

    if cli.addresses.is_empty() {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        if interactive {
            prompt(&mut out)?;
        }
        for line in stdin.lock().lines() {
            let line = line?;
            let input = line.trim();
            if matches!(input, "q" | "quit" | "exit") {
                break;
            }
            if !input.is_empty() {
                match parse_address(input) {
                    Some(address) => report(&mut out, cli.json, address, &cache.access(address))?,
                    None => writeln!(out, "Invalid address. Please enter a valid integer.")?,
                }
            }
            if interactive {
                prompt(&mut out)?;
            }
        }
    } else {
        for &address in &cli.addresses {
            report(&mut out, cli.json, address, &cache.access(address))?;
        }
    }

    if cli.stats {
        if cli.json {
            let summary = Summary {
                geometry: cache.geometry(),
                stats: cache.stats(),
            };
            writeln!(out, "{}", serde_json::to_string(&summary)?)?;
        } else {
            write!(out, "{}", cache.stats())?;
        }
    }
    out.flush()
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "Enter a memory address to access (q to exit): ")?;
    out.flush()
}

/// Accepts decimal or `0x`-prefixed hexadecimal, optionally negative.
///
/// At most one leading `-` is allowed; anything that does not fit in `i64` is rejected.
fn parse_address(input: &str) -> Option<i64> {
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_address_arg(input: &str) -> Result<i64, String> {
    parse_address(input).ok_or_else(|| format!("invalid address '{input}'"))
}

fn print_header(out: &mut impl Write, geometry: &CacheGeometry) -> io::Result<()> {
    writeln!(
        out,
        "Cache: {} | {} bytes | {}-byte blocks | {} lines | {} way(s) x {} set(s)",
        geometry.mapping().label(),
        geometry.size_bytes(),
        geometry.block_bytes(),
        geometry.line_count(),
        geometry.ways(),
        geometry.set_count()
    )?;
    writeln!(out, "Main memory: {} bytes", geometry.main_memory_bytes())?;
    writeln!(out)
}

fn report(out: &mut impl Write, json: bool, address: i64, result: &AccessResult) -> io::Result<()> {
    if json {
        return writeln!(out, "{}", serde_json::to_string(result)?);
    }

    if let Some(d) = &result.decomposition {
        writeln!(
            out,
            "Address {address}: block {}, set {}, tag {}, offset {}",
            d.block_number, d.set_index, d.tag, d.offset
        )?;
    }
    match result.outcome {
        AccessOutcome::Hit { set_index, slot } => {
            writeln!(out, "Cache hit! Found in set {set_index}, block {slot}")?;
        }
        AccessOutcome::Miss {
            set_index,
            slot,
            evicted_tag,
        } => {
            writeln!(out, "Cache miss! Loading into set {set_index}, block {slot}")?;
            if let Some(tag) = evicted_tag {
                writeln!(out, "Evicted tag {tag}")?;
            }
        }
        AccessOutcome::Violation { address } => {
            writeln!(
                out,
                "Memory access violation / segmentation fault: address {address}"
            )?;
        }
    }
    if let Some(snapshot) = &result.snapshot {
        write!(out, "{snapshot}")?;
    }
    writeln!(out)
}
