use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pawgrove_lib::app::{App, RunOptions};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// Override the RNG seed from the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the JSONL event log
    #[arg(long, default_value = "logs")]
    log_dir: String,

    /// Only warnings and errors on the console
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = RunOptions {
        config_path: args.config,
        ticks: args.ticks,
        seed: args.seed,
        log_dir: args.log_dir,
    };

    let mut app = App::new(&options)?;
    app.run(options.ticks)?;

    Ok(())
}
