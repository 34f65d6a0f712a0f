use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::domain::weather::ForecastDay;

const DESCRIPTION_WIDTH: usize = 34;

/// Plain-text forecast table for terminal output.
pub fn render_table(city: &str, days: &[ForecastDay]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", city.trim());
    let _ = writeln!(
        out,
        "{:<10}  {:<DESCRIPTION_WIDTH$}  {:>5}  {:>5}  {:>6}  {:<5}  {:>6}",
        "Data", "Tempo", "Mín", "Máx", "Prec.", "Vento", "Classe"
    );

    for day in days {
        let date = day
            .forecast_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .or_else(|| day.text("forecastDate"))
            .unwrap_or_else(|| "-".to_string());
        let precipitation = day
            .precipitation_probability()
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<10}  {:<DESCRIPTION_WIDTH$}  {:>5}  {:>5}  {:>6}  {:<5}  {:>6}",
            date,
            truncate(&day.descricao, DESCRIPTION_WIDTH),
            day.temperature_min().unwrap_or_else(|| "-".to_string()),
            day.temperature_max().unwrap_or_else(|| "-".to_string()),
            precipitation,
            day.wind_direction().unwrap_or_else(|| "-".to_string()),
            day.wind_speed_class().unwrap_or_else(|| "-".to_string()),
        );
    }

    out
}

pub fn render_json(days: &[ForecastDay]) -> Result<String> {
    serde_json::to_string_pretty(days).context("serializing forecast failed")
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
