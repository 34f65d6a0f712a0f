use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FALLBACK_DESCRIPTION: &str = "-";
pub const FALLBACK_ICON: &str = "icon-fallback.svg";

/// A daily record exactly as IPMA sends it.
pub type RawForecastDay = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherType {
    pub description: String,
    pub icon_file: String,
}

impl WeatherType {
    pub fn new(code: i64, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            icon_file: icon_file_for(code),
        }
    }

    pub fn fallback() -> Self {
        Self {
            description: FALLBACK_DESCRIPTION.to_string(),
            icon_file: FALLBACK_ICON.to_string(),
        }
    }
}

/// `w_ic_d_NN.svg`, with the code zero-padded to two digits.
pub fn icon_file_for(code: i64) -> String {
    format!("w_ic_d_{code:02}.svg")
}

#[derive(Debug, Clone, Default)]
pub struct WeatherTypeIndex {
    types: HashMap<i64, WeatherType>,
}

impl WeatherTypeIndex {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            types: entries
                .into_iter()
                .map(|(code, description)| (code, WeatherType::new(code, description)))
                .collect(),
        }
    }

    pub fn get(&self, code: i64) -> Option<&WeatherType> {
        self.types.get(&code)
    }

    /// Description and icon for an optional code, falling back to
    /// [`WeatherType::fallback`] for unknown or unreadable codes.
    pub fn describe(&self, code: Option<i64>) -> WeatherType {
        code.and_then(|code| self.get(code))
            .cloned()
            .unwrap_or_else(WeatherType::fallback)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Reads the `idWeatherType` of a daily record.
///
/// A missing field counts as code 0. Integers, floats (truncated) and
/// integer strings are accepted; any other value yields `None`.
pub fn weather_type_code(value: Option<&Value>) -> Option<i64> {
    match value {
        None => Some(0),
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        }),
        Some(Value::String(text)) => text.trim().parse().ok(),
        Some(_) => None,
    }
}

/// One day of a city forecast: every upstream field, plus the description
/// and icon derived from its weather type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(flatten)]
    pub fields: RawForecastDay,
    pub descricao: String,
    pub icon_file: String,
}

impl ForecastDay {
    pub fn enrich(mut fields: RawForecastDay, types: &WeatherTypeIndex) -> Self {
        fields.remove("descricao");
        fields.remove("icon_file");
        let weather = types.describe(weather_type_code(fields.get("idWeatherType")));
        Self {
            fields,
            descricao: weather.description,
            icon_file: weather.icon_file,
        }
    }

    /// A string or number field rendered as text.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn forecast_date(&self) -> Option<NaiveDate> {
        parse_date(&self.text("forecastDate")?)
    }

    pub fn temperature_min(&self) -> Option<String> {
        self.text("tMin")
    }

    pub fn temperature_max(&self) -> Option<String> {
        self.text("tMax")
    }

    pub fn precipitation_probability(&self) -> Option<String> {
        self.text("precipitaProb")
    }

    pub fn wind_direction(&self) -> Option<String> {
        self.text("predWindDir")
    }

    /// IPMA wind-speed class, 1 (weak) to 4 (very strong).
    pub fn wind_speed_class(&self) -> Option<String> {
        self.text("classWindSpeed")
    }
}

/// Enriches every record, keeping upstream order.
pub fn enrich_days(days: Vec<RawForecastDay>, types: &WeatherTypeIndex) -> Vec<ForecastDay> {
    days.into_iter()
        .map(|day| ForecastDay::enrich(day, types))
        .collect()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
