use reqwest::StatusCode;
use thiserror::Error;

/// Failure classes for one request/decode round trip against OpenWeather.
///
/// Each variant maps to a distinct stage of the pipeline, so callers and
/// diagnostics can tell a dead network apart from a rejected key or a
/// shape mismatch. `endpoint` names the API being talked to, e.g.
/// "current weather" or "5-day forecast".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to construct HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to OpenWeather ({endpoint}) timed out")]
    Timeout {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send request to OpenWeather ({endpoint})")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read OpenWeather {endpoint} response body")]
    Body {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. The body is kept (truncated) because OpenWeather
    /// returns a JSON error object describing the rejection.
    #[error("OpenWeather {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse OpenWeather {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
