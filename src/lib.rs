pub mod aggregator;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod report;
pub mod resilience;
pub mod web;

use std::io::{self, Write};

use anyhow::{Context, Result};
use app::{
    settings::{load_runtime_settings, save_runtime_settings},
    state::AppState,
};
use cli::{Cli, RunMode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let (settings, settings_path) = load_runtime_settings(&cli);

    if cli.save_settings {
        match settings_path.as_deref() {
            Some(path) => {
                save_runtime_settings(path, &settings)?;
                info!("settings saved to {}", path.display());
            }
            None => warn!("no settings location available; nothing saved"),
        }
    }

    let state = AppState::bootstrap(settings).await?;

    match cli.mode() {
        RunMode::Serve => web::serve(state).await,
        RunMode::OneShot => print_forecast(&state, &cli).await,
        RunMode::ListCities => print_cities(&state),
    }
}

async fn print_forecast(state: &AppState, cli: &Cli) -> Result<()> {
    let city = cli.city.as_deref().unwrap_or_default();
    let days = match state.aggregator.forecast_by_city(city).await {
        Ok(days) => days,
        Err(err) => anyhow::bail!("{}", err.user_message()),
    };

    let rendered = if cli.json {
        report::render_json(&days)?
    } else {
        report::render_table(city, &days)
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("writing forecast failed")
}

fn print_cities(state: &AppState) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for name in state.reference().cities.names() {
        writeln!(stdout, "{name}").context("writing city list failed")?;
    }
    Ok(())
}

/// Logs go to stderr so one-shot output stays clean; `RUST_LOG` overrides
/// the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}
