pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sigil")]
#[command(about = "Manage domain key bundles, sign handshakes and seal messages between domains")]
pub struct Args {
    /// Path to the key bundle (defaults to ~/.sigil/keys.json)
    #[arg(long, global = true, env = "SIGIL_BUNDLE")]
    pub bundle: Option<PathBuf>,

    /// Default log level, RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
