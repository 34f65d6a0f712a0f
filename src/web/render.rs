use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{domain::weather::ForecastDay, web::Flash};

const WEEKDAYS_PT: [&str; 7] = ["seg", "ter", "qua", "qui", "sex", "sáb", "dom"];

pub fn index_page(cities: &[&str], flash: Option<Flash>) -> String {
    let mut body = String::new();
    if let Some(flash) = flash {
        push_flash(&mut body, flash);
    }

    body.push_str(
        r#"<form action="/resultado" method="get" class="search">
  <label for="cidade">Cidade</label>
  <input id="cidade" name="cidade" list="cidades" autocomplete="off" required>
  <button type="submit">Ver previsão</button>
"#,
    );
    body.push_str("  <datalist id=\"cidades\">\n");
    for city in cities {
        let _ = writeln!(
            body,
            "    <option value=\"{}\">",
            encode_double_quoted_attribute(city)
        );
    }
    body.push_str("  </datalist>\n</form>\n");

    layout("Previsão do tempo", &body)
}

pub fn forecast_page(city: &str, days: &[ForecastDay], icons_url: &str) -> String {
    let icons_url = icons_url.trim_end_matches('/');
    let mut body = String::new();
    let _ = writeln!(body, "<h2>{}</h2>", encode_text(city.trim()));

    if days.is_empty() {
        body.push_str("<p class=\"empty\">Sem previsão disponível.</p>\n");
    } else {
        body.push_str("<ol class=\"days\">\n");
        for day in days {
            push_day(&mut body, day, icons_url);
        }
        body.push_str("</ol>\n");
    }
    body.push_str("<p><a href=\"/\">Nova pesquisa</a></p>\n");

    layout(&format!("Previsão para {}", city.trim()), &body)
}

fn push_day(body: &mut String, day: &ForecastDay, icons_url: &str) {
    let date = day
        .forecast_date()
        .map(day_label)
        .or_else(|| day.text("forecastDate"))
        .unwrap_or_else(|| "-".to_string());
    let icon_src = format!("{icons_url}/{}", day.icon_file);

    let _ = write!(
        body,
        r#"  <li class="day">
    <h3>{date}</h3>
    <img src="{src}" alt="{alt}" width="64" height="64">
    <p class="desc">{desc}</p>
    <p class="temp">{min}° / {max}°</p>
    <p class="meta">Precipitação {prec}% · Vento {wind} (classe {wind_class})</p>
  </li>
"#,
        date = encode_text(&date),
        src = encode_double_quoted_attribute(&icon_src),
        alt = encode_double_quoted_attribute(&day.descricao),
        desc = encode_text(&day.descricao),
        min = encode_text(&or_dash(day.temperature_min())),
        max = encode_text(&or_dash(day.temperature_max())),
        prec = encode_text(&or_dash(day.precipitation_probability())),
        wind = encode_text(&or_dash(day.wind_direction())),
        wind_class = encode_text(&or_dash(day.wind_speed_class())),
    );
}

fn push_flash(body: &mut String, flash: Flash) {
    let _ = writeln!(
        body,
        "<p class=\"flash erro\" role=\"alert\">{}</p>",
        encode_text(flash.message())
    );
}

/// `"seg, 19/10"`
pub fn day_label(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_PT[date.weekday().num_days_from_monday() as usize];
    format!("{weekday}, {}", date.format("%d/%m"))
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
<h1><a href="/">Previsão IPMA</a></h1>
{body}</body>
</html>
"#,
        title = encode_text(title),
    )
}
