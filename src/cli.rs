#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Serve,
    OneShot,
    ListCities,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ipma-forecast",
    version,
    about = "City weather forecasts from the IPMA open-data API"
)]
pub struct Cli {
    /// City name (used with --one-shot)
    pub city: Option<String>,

    /// Print the forecast for CITY to stdout and exit
    #[arg(long)]
    pub one_shot: bool,

    /// Emit JSON instead of a table
    #[arg(long, requires = "one_shot")]
    pub json: bool,

    /// Print the known city names and exit
    #[arg(long, conflicts_with = "one_shot")]
    pub list_cities: bool,

    /// Address for the web server (default: 127.0.0.1:5000)
    #[arg(long)]
    pub listen: Option<String>,

    /// IPMA API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Upstream request timeout in seconds (1..120)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout: Option<u64>,

    /// Base URL the pages use for weather icons
    #[arg(long)]
    pub icons_url: Option<String>,

    /// Directory served under /static
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Write the effective settings to the settings file
    #[arg(long)]
    pub save_settings: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        let has_city = self
            .city
            .as_deref()
            .is_some_and(|city| !city.trim().is_empty());
        if self.one_shot && !has_city {
            anyhow::bail!("--one-shot requires a city name");
        }
        Ok(())
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        if self.list_cities {
            RunMode::ListCities
        } else if self.one_shot {
            RunMode::OneShot
        } else {
            RunMode::Serve
        }
    }
}
