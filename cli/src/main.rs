//! navspy: replay scroll-spy sessions and inspect the header link table.

mod render;
mod trace;

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use navspy_config::NavConfig;
use navspy_types::{ActiveSection, Location, NavSettings, SectionId};

use crate::trace::Trace;

#[derive(Parser)]
#[command(name = "navspy")]
#[command(about = "Replay scroll-spy sessions against the navigation core")]
struct Cli {
    /// Config file (default: $NAVSPY_CONFIG or ~/.navspy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and print the state after every step
    Replay {
        /// Trace file (JSON)
        trace: PathBuf,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the header link table as rendered at a location
    Links {
        /// Location to render at, e.g. `/hero` or `/#about`
        #[arg(long, default_value = "/")]
        at: String,
        /// Section to treat as active (single-page layout only)
        #[arg(long)]
        active: Option<String>,
        /// Print links as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(env_filter)
        .init();
}

fn load_settings(explicit: Option<&Path>) -> Result<NavSettings> {
    let config = match explicit {
        Some(path) => Some(NavConfig::load_from(path)?),
        None => NavConfig::load()?,
    };
    match config {
        Some(config) => config
            .into_settings()
            .context("invalid navspy configuration"),
        None => Ok(NavSettings::default()),
    }
}

fn replay(settings: NavSettings, path: &Path, json: bool) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    let trace: Trace = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse trace {}", path.display()))?;

    let reports = trace::replay(&trace, settings);
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", render::render_reports(&reports));
    }
    Ok(())
}

fn links(settings: &NavSettings, at: &str, active: Option<&str>, json: bool) -> Result<()> {
    let location = Location::parse(at);
    let active = match active {
        Some(raw) => {
            let id = SectionId::new(raw).with_context(|| format!("invalid section `{raw}`"))?;
            anyhow::ensure!(
                settings.catalog().contains(&id),
                "section `{id}` is not declared"
            );
            ActiveSection::Section(id)
        }
        None if location.context().is_single_page() => {
            ActiveSection::Section(settings.catalog().home().clone())
        }
        None => ActiveSection::Unmeasured,
    };

    let views = settings
        .links()
        .views(&location, &active, settings.catalog().home());
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        println!("{}", render::render_links(&views));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Commands::Replay { trace, json } => replay(settings, &trace, json),
        Commands::Links { at, active, json } => links(&settings, &at, active.as_deref(), json),
    }
}
