//! Registers configuration sources from the command line and prints what a
//! component would be configured with.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use etl_kit::messages::quote;
use etl_kit::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "source-discovery", about = "Discover configuration sources for an ETL component")]
struct Args {
    /// Files or directories to register, in order.
    #[arg(required = true)]
    paths: Vec<String>,

    /// JSON settings file for the registry.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Maximum directory depth; overrides the settings file.
    #[arg(long, allow_negative_numbers = true)]
    max_depth: Option<i32>,

    /// Keep walking a directory after a warning.
    #[arg(long)]
    suppress_warnings: bool,

    /// Print the result as JSON instead of plain lines.
    #[arg(long)]
    json: bool,
}

/// Keeps the first error, otherwise the first warning.
fn worse(current: StatusCode, next: StatusCode) -> StatusCode {
    match (current.kind(), next.kind()) {
        (StatusKind::Error, _) | (StatusKind::Warning, StatusKind::Success | StatusKind::Warning) => {
            current
        }
        _ => next,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => RegistrySettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RegistrySettings::default(),
    };
    if let Some(depth) = args.max_depth {
        settings = settings.with_default_max_depth(depth);
    }
    if args.suppress_warnings {
        settings = settings.with_suppress_warnings_on_add(true);
    }

    let mut registry = settings.build_registry("source-discovery")?;
    info!(id = %registry.id(), "registry ready");

    let mut worst = StatusCode::SUCCESS;
    for path in &args.paths {
        let status = registry.register(path);
        if status.is_error() {
            warn!(path = path.as_str(), %status, "registration failed");
        }
        worst = worse(worst, status);
    }

    if args.json {
        let report = serde_json::json!({
            "component": registry.name(),
            "status": worst,
            "configured": registry.is_configured(),
            "sources": registry.sources(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for source in registry.sources() {
            println!("{}", quote(source));
        }
        println!("{} source(s), status {worst}", registry.count());
    }

    if worst.is_error() {
        bail!("at least one configuration source could not be registered");
    }
    Ok(())
}
