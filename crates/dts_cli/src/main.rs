//! dts-etch command line
//!
//! ```text
//! dts-etch extract <file.d.ts> [-o out.json]
//! dts-etch diff <old.json> <new.json> [-f text|json|html] [--no-color] [--dedupe]
//! dts-etch changelog <dir> [-o out-dir] [-f text|json|html] [--dedupe]
//! ```
//!
//! # Environment Variables
//!
//! - `DTS_ETCH_LOG` - Log level (default: "info")
//!
//! Settings are read from `dts-etch.toml` in the working directory when
//! present; flags override them.

use anyhow::{Context, Result};
use dts_etch::EtchConfig;
use std::env;

mod changelog;
mod diff;
mod extract;
mod report;

fn usage() {
    eprintln!("dts-etch <extract|diff|changelog> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  extract <file.d.ts> [-o <out.json>]        Extract the API structure of a declaration file");
    eprintln!("  diff <old.json> <new.json>                 Compare two stored structures");
    eprintln!("  changelog <dir> [-o <out-dir>]             Compare every consecutive pair of <version>.json files");
    eprintln!();
    eprintln!("Options for diff and changelog:");
    eprintln!("  -f, --format <text|json|html>  Report format (default: text)");
    eprintln!("  --no-color                     Disable colored terminal output");
    eprintln!("  --dedupe                       Report each shared difference once instead of twice");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DTS_ETCH_LOG  Log filter (default: info)");
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("DTS_ETCH_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let mut args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        usage();
        return Ok(());
    }

    let cmd = args.remove(0);
    let cwd = env::current_dir().context("reading working directory")?;
    let config = EtchConfig::discover(&cwd).context("loading dts-etch.toml")?;

    match cmd.as_str() {
        "extract" => extract::run(&args)?,
        "diff" => diff::run(&args, &config)?,
        "changelog" => changelog::run(&args, &config)?,
        "--version" | "-V" => println!("{} {}", dts_etch::NAME, dts_etch::VERSION),
        "help" | "--help" | "-h" => usage(),
        other => {
            usage();
            anyhow::bail!("Unknown command: {}", other);
        }
    }

    Ok(())
}
