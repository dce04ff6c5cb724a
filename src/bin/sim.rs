//! jambel Simulator Binary
//!
//! Serves a simulated jambel over TCP.

use clap::Parser;
use jambel::Simulator;
use tracing_subscriber::{fmt, EnvFilter};

/// jambel simulator
#[derive(Parser, Debug)]
#[command(name = "jambel-sim")]
#[command(about = "Simulated jambel traffic light")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:10001")]
    listen: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,jambel=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("jambel simulator v{}", jambel::VERSION);

    // Nobody drains the request log here, so don't keep one
    let simulator = match Simulator::start_with_log_capacity(&args.listen, 0) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start simulator on {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    simulator.wait();
}
