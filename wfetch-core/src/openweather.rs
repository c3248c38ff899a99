use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::model::{ForecastBundle, ForecastEntry, Unit, WeatherSnapshot};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Format of the `dt_txt` field in forecast responses.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client for the OpenWeather "current weather" and "5-day forecast"
/// endpoints.
///
/// The credential is constructor state, never read from the environment
/// here, and every request carries a bounded timeout.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Like [`OpenWeatherClient::new`] but against an alternate endpoint,
    /// e.g. a local stub server in integration tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { api_key, base_url, http })
    }

    /// Fetch the current weather for a city.
    pub async fn current(&self, city: &str, unit: Unit) -> Result<WeatherSnapshot, FetchError> {
        info!(city, "fetching current weather");

        let body = self.get("weather", "current weather", city, unit).await?;
        decode_current(&body)
    }

    /// Fetch the 5-day/3-hour forecast for a city.
    pub async fn forecast(&self, city: &str, unit: Unit) -> Result<ForecastBundle, FetchError> {
        info!(city, "fetching 5-day forecast");

        let body = self.get("forecast", "5-day forecast", city, unit).await?;
        decode_forecast(&body)
    }

    /// One GET against `<base_url>/<path>`, returning the body of a 2xx
    /// response. Exactly one attempt, no retries.
    async fn get(
        &self,
        path: &str,
        endpoint: &'static str,
        city: &str,
        unit: Unit,
    ) -> Result<String, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", unit.api_token())])
            .send()
            .await
            .map_err(|e| classify_send_error(endpoint, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { endpoint, source: e }
            } else {
                FetchError::Body { endpoint, source: e }
            }
        })?;

        // Non-2xx bodies are JSON error payloads, never a success shape.
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status, body: truncate_body(&body) });
        }

        debug!(endpoint, bytes = body.len(), "response received");
        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
    feels_like: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainData,
    weather: Vec<ConditionInfo>,
}

#[derive(Debug, Deserialize)]
struct CityInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt_txt: String,
    main: MainData,
    weather: Vec<ConditionInfo>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: CityInfo,
    list: Vec<ForecastItem>,
}

fn decode_current(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let parsed: CurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Decode { endpoint: "current weather", source: e })?;

    Ok(WeatherSnapshot {
        location: parsed.name,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        temp_max: parsed.main.temp_max,
        humidity: parsed.main.humidity,
        condition: first_description(&parsed.weather),
    })
}

fn decode_forecast(body: &str) -> Result<ForecastBundle, FetchError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Decode { endpoint: "5-day forecast", source: e })?;

    let entries = parsed
        .list
        .into_iter()
        .filter_map(|item| match NaiveDateTime::parse_from_str(&item.dt_txt, DT_TXT_FORMAT) {
            Ok(timestamp) => Some(ForecastEntry {
                timestamp,
                temperature: item.main.temp,
                feels_like: item.main.feels_like,
                temp_max: item.main.temp_max,
                humidity: item.main.humidity,
                condition: first_description(&item.weather),
            }),
            Err(err) => {
                warn!(dt_txt = %item.dt_txt, %err, "skipping forecast entry with unparseable timestamp");
                None
            }
        })
        .collect();

    Ok(ForecastBundle { city: parsed.city.name, entries })
}

/// The `weather` array is non-empty on every documented payload, but an
/// empty one must not take the report down with it.
fn first_description(weather: &[ConditionInfo]) -> String {
    weather.first().map(|w| w.description.clone()).unwrap_or_else(|| "Unknown".to_string())
}

fn classify_send_error(endpoint: &'static str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout { endpoint, source: e }
    } else {
        FetchError::Transport { endpoint, source: e }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
