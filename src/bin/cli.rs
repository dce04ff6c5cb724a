//! jambel CLI Client
//!
//! Remote control a jambel from the command line.

use clap::Parser;
use jambel::cli::{self, Instruction};
use jambel::{Config, Endpoint, GreenPosition, Jambel};
use tracing_subscriber::{fmt, EnvFilter};

/// jambel CLI
#[derive(Parser, Debug)]
#[command(name = "jambel")]
#[command(about = "Remote control a jambel traffic light")]
#[command(version)]
struct Args {
    /// Jambel address (format: HOST[:PORT])
    #[arg(value_name = "HOST")]
    addr: Endpoint,

    /// Commands to execute in order: status, reset, version, test or
    /// <red|yellow|green>=<on|off|blink|flash>
    #[arg(value_name = "CMD", required = true)]
    commands: Vec<Instruction>,

    /// Turn debugging on
    #[arg(long)]
    debug: bool,

    /// Red light is on top (green module is numbered first)
    #[arg(long)]
    red_on_top: bool,

    /// Connect/read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli::default_log_filter(args.debug)));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let green_position = if args.red_on_top {
        GreenPosition::Bottom
    } else {
        GreenPosition::Top
    };

    let config = Config::builder()
        .endpoint(args.addr)
        .green_position(green_position)
        .timeout_ms(args.timeout_ms)
        .build();
    let jambel = Jambel::new(config);

    match cli::run(&jambel, &args.commands) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            tracing::error!("Failed talking to {}: {}", jambel.endpoint(), e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
