use anyhow::Result;
use clap::{CommandFactory, Parser};
use inquire::Password;

use wfetch_core::{Config, FileConfig, OpenWeatherClient, Unit};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wfetch", version, about = "Weather Fetcher CLI")]
pub struct Cli {
    /// City to fetch the weather for.
    #[arg(long, default_value = "")]
    pub city: String,

    /// Temperature unit: "metric" (Celsius) or "imperial" (Fahrenheit).
    #[arg(long, default_value = "metric")]
    pub unit: String,

    /// Show the 5-day forecast instead of the current weather.
    #[arg(long)]
    pub forecast: bool,

    /// Store an OpenWeather API key in the config file and exit.
    #[arg(long)]
    pub configure: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if self.configure {
            return configure();
        }

        if self.city.is_empty() {
            let mut cmd = Cli::command();
            eprintln!("Please provide a city name using the --city flag.");
            eprintln!("{}", cmd.render_long_help());
            std::process::exit(1);
        }

        let unit = Unit::from_token(&self.unit);
        let config = Config::load()?;
        let client = OpenWeatherClient::new(config.api_key)?;

        if self.forecast {
            let bundle = client.forecast(&self.city, unit).await?;
            print!("{}", render::render_forecast(&bundle, unit));
        } else {
            let snapshot = client.current(&self.city, unit).await?;
            print!("{}", render::render_current(&snapshot, unit));
        }

        Ok(())
    }
}

/// Interactive credential setup: prompt for the key, save it to the
/// platform config file, report where it went.
fn configure() -> Result<()> {
    let api_key = Password::new("OpenWeather API key:").without_confirmation().prompt()?;

    let mut file = FileConfig::load()?;
    file.api_key = Some(api_key);
    let path = file.save()?;

    println!("API key saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["wfetch"]).expect("no args is a valid parse");

        assert_eq!(cli.city, "");
        assert_eq!(cli.unit, "metric");
        assert!(!cli.forecast);
        assert!(!cli.configure);
    }

    #[test]
    fn parses_city_unit_and_forecast() {
        let cli = Cli::try_parse_from([
            "wfetch",
            "--city",
            "New York",
            "--unit",
            "imperial",
            "--forecast",
        ])
        .expect("valid arguments");

        assert_eq!(cli.city, "New York");
        assert_eq!(cli.unit, "imperial");
        assert!(cli.forecast);
    }

    #[test]
    fn version_flag_short_circuits_parsing() {
        let err = Cli::try_parse_from(["wfetch", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}
