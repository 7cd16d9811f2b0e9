//! Validate a node's secrets file before flashing it.
//!
//! ```bash
//! check-config                    # reads ./secrets.env
//! check-config path/to/node.env
//! check-config --env CLIMATE_     # reads CLIMATE_WIFI_SSID, ...
//! check-config --template > secrets.env
//! ```
//!
//! Prints a redacted summary and exits 0, or names the offending key and
//! exits 1. Set `RUST_LOG=debug` for loader diagnostics.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use climate_node::template::{SECRETS_FILE, SECRETS_TEMPLATE};
use climate_node::NodeConfig;

const USAGE: &str = "usage: check-config [PATH] | --env [PREFIX] | --template";

enum Command {
    File(PathBuf),
    Env(String),
    Template,
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let command = match args.next().as_deref() {
        None => Command::File(PathBuf::from(SECRETS_FILE)),
        Some("--help" | "-h") => Command::Help,
        Some("--template") => Command::Template,
        Some("--env") => Command::Env(args.next().unwrap_or_default()),
        Some(flag) if flag.starts_with('-') => anyhow::bail!("unknown option {flag}\n{USAGE}"),
        Some(path) => Command::File(PathBuf::from(path)),
    };
    if let Some(extra) = args.next() {
        anyhow::bail!("unexpected argument {extra}\n{USAGE}");
    }
    Ok(command)
}

fn run() -> Result<()> {
    let config = match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(());
        }
        Command::Template => {
            print!("{SECRETS_TEMPLATE}");
            return Ok(());
        }
        Command::Env(prefix) => NodeConfig::from_env(&prefix)
            .with_context(|| format!("environment variables with prefix '{prefix}'"))?,
        Command::File(path) => {
            NodeConfig::from_file(&path).with_context(|| format!("{}", path.display()))?
        }
    };

    println!("{config}");
    log::info!("configuration OK");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
