//! ictkv Replay
//!
//! Replays a script of wire requests and prints each numeric result.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use ictkv::replay::replay;
use ictkv::{Config, Engine, OverflowPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// ictkv Replay
#[derive(Parser, Debug)]
#[command(name = "ictkv-replay")]
#[command(about = "Replay a script of ictkv requests, one per line")]
#[command(version)]
struct Args {
    /// Script file, or '-' for stdin
    #[arg(default_value = "-")]
    script: String,

    /// Number of table slots
    #[arg(short, long, default_value = "50")]
    capacity: usize,

    /// Behavior of PUSH on a full table (reset, reject, evict-oldest)
    #[arg(short, long, default_value = "reset")]
    overflow: OverflowPolicy,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ictkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("ictkv Replay v{}", ictkv::VERSION);

    let config = Config::builder()
        .capacity(args.capacity)
        .overflow_policy(args.overflow)
        .build();

    let engine = match Engine::new(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to create engine: {}", e);
            std::process::exit(1);
        }
    };

    let input: Box<dyn BufRead> = if args.script == "-" {
        Box::new(io::stdin().lock())
    } else {
        match File::open(&args.script) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                tracing::error!("Failed to open script {}: {}", args.script, e);
                std::process::exit(1);
            }
        }
    };

    match replay(&engine, input, io::stdout().lock()) {
        Ok(stats) => tracing::info!(
            "Replayed {} requests: {} accepted, {} rejected, {} found",
            stats.requests,
            stats.accepted,
            stats.rejected,
            stats.found
        ),
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            std::process::exit(e.errno().abs().max(1));
        }
    }
}
