//! Operator CLI for arcd configuration and credentials.
//!
//! ```text
//! arcd-config [--config <PATH>] <COMMAND>
//!
//!   defaults                       print the compiled-in defaults
//!   check                          load + validate, print the merged result
//!   hash-password <plaintext>      produce a value for the `password` field
//!   verify <username> <password>   check a login against the configuration
//! ```
//!
//! Secrets are masked in everything this binary prints. Set `RUST_LOG` to
//! adjust log verbosity (default `info`, written to stderr).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use arcd_config::config::{load_config, load_config_with_fingerprint, Configuration};
use arcd_config::crypto::credentials::authenticate;
use arcd_config::crypto::passwords::{hash_password, HashCost, DEFAULT_COST};

#[derive(Debug, Parser)]
#[command(
    name = "arcd-config",
    about = "Inspect arcd configuration and manage the administrative password",
    version
)]
struct Cli {
    /// JSON configuration document.
    #[arg(long, short, global = true, env = "ARCD_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the compiled-in defaults as JSON.
    Defaults,
    /// Load and validate the configuration, then print it with secrets masked.
    Check,
    /// Hash a password for the `password` configuration field.
    HashPassword {
        plaintext: String,
        /// Argon2id cost factor; memory use is 2^cost KiB.
        #[arg(long, default_value_t = DEFAULT_COST)]
        cost: u32,
    },
    /// Check a username and password against the loaded configuration.
    Verify { username: String, password: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Defaults => {
            let defaults = Configuration::default().redacted();
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        }
        Command::Check => {
            let (config, fingerprint) = load_config_with_fingerprint(&cli.config)
                .with_context(|| format!("configuration at {} rejected", cli.config.display()))?;
            let printable = json!({
                "path": cli.config.display().to_string(),
                "sha256": fingerprint,
                "configuration": config.redacted(),
            });
            println!("{}", serde_json::to_string_pretty(&printable)?);
        }
        Command::HashPassword { plaintext, cost } => {
            let plaintext = Zeroizing::new(plaintext);
            let cost = HashCost::new(cost)?;
            let hash = hash_password(&plaintext, cost).context("hashing failed")?;
            println!("{hash}");
        }
        Command::Verify { username, password } => {
            let password = Zeroizing::new(password);
            let config = load_config(&cli.config)
                .with_context(|| format!("configuration at {} rejected", cli.config.display()))?;
            let matches = authenticate(&config, &username, &password);
            println!("{}", if matches { "match" } else { "no-match" });
        }
    }

    Ok(())
}
