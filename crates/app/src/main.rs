//! sigil - manage domain key bundles from the command line
//!
//! Keys live in a JSON bundle (default `~/.sigil/keys.json`). Every
//!  subcommand opens the bundle, does one thing and prints the result.

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use cli::{args::Args, op::Op, Address, Decrypt, Encrypt, Init, Key, Show, Sign, Verify, Version};

command_enum! {
    (Init, Init),
    (Show, Show),
    (Sign, Sign),
    (Verify, Verify),
    (Encrypt, Encrypt),
    (Decrypt, Decrypt),
    (Key, Key),
    (Address, Address),
    (Version, Version),
}

fn init_logging(level: &str) {
    let log_level: tracing::Level = level.parse().unwrap_or(tracing::Level::WARN);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let ctx = cli::op::OpContext::new(args.bundle).context("failed to resolve key bundle path")?;
    tracing::debug!(bundle = %ctx.bundle_path.display(), "resolved key bundle");

    match args.command.execute(&ctx) {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
