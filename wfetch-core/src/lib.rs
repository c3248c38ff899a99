//! Core library for the `wfetch` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather client (current weather and 5-day forecast)
//! - Shared domain models and the fetch error taxonomy
//!
//! It is used by `wfetch-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod openweather;

pub use config::{Config, FileConfig};
pub use error::FetchError;
pub use model::{ForecastBundle, ForecastEntry, Unit, WeatherSnapshot};
pub use openweather::OpenWeatherClient;
