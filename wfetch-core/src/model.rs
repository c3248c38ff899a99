use chrono::NaiveDateTime;

/// Temperature unit selected by the `--unit` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    /// Map a raw CLI token. Exactly `"imperial"` selects Fahrenheit; any
    /// other token falls back to metric, so garbage never reaches the wire.
    pub fn from_token(token: &str) -> Self {
        match token {
            "imperial" => Unit::Imperial,
            _ => Unit::Metric,
        }
    }

    /// Display suffix for temperatures.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    /// Value of the `units` query parameter.
    pub fn api_token(self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }
}

/// One point-in-time reading for a location.
///
/// Temperatures and humidity are in whatever unit system the request asked
/// for; the condition is already reduced to a single description.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub condition: String,
}

/// One 3-hour forecast bucket.
#[derive(Debug, Clone)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub condition: String,
}

/// Forecast readings for one city, in the order the API returned them
/// (chronological, 3-hour buckets over 5 days).
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub city: String,
    pub entries: Vec<ForecastEntry>,
}
