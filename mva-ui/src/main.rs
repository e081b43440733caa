use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mva_core::FiscalYear;
use tokio::io::BufReader;
use tracing::{debug, info};

use mva_ui::utils::parse_price;
use mva_ui::{App, Settings, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// VAT phase-in calculator for electric cars, 2025 to 2028.
///
/// Shows how the purchase price of a car changes as the VAT exemption
/// threshold is lowered each year, and lets you explore prices interactively.
#[derive(Debug, Parser)]
struct Cli {
    /// Settings file (TOML). Missing keys fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting price in 2025, e.g. `750000`, `750k` or `1.5M`.
    #[arg(long, value_parser = parse_price)]
    price: Option<rust_decimal::Decimal>,

    /// Year to select at start-up.
    #[arg(long, value_parser = parse_year)]
    year: Option<FiscalYear>,

    /// Log filter, overridden by `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the dashboard once and exit.
    #[arg(long)]
    once: bool,

    /// Jump straight to new values instead of animating.
    #[arg(long)]
    no_animation: bool,
}

fn parse_year(s: &str) -> Result<FiscalYear, String> {
    FiscalYear::parse(s).ok_or_else(|| format!("'{s}' is not a year between 2025 and 2028"))
}

impl Cli {
    /// Loads the settings file, if any, and applies command-line overrides.
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(price) = self.price {
            settings.default_price = price;
        }
        if let Some(year) = self.year {
            settings.default_year = year;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        if self.no_animation {
            settings.animation_ms = 0;
        }
        Ok(settings)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    logging::init_logging(&settings.log_level);
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "settings resolved");

    let mut app = App::new(&settings)?;

    if cli.once {
        println!("{}", app.render());
        return Ok(());
    }

    info!("starting interactive session");
    let input = BufReader::new(tokio::io::stdin());
    let mut out = io::stdout().lock();
    app.run(input, &mut out)
        .await
        .context("interactive session failed")
}
