use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable holding the OpenWeather credential, matching the
/// name used in the tool's `.env` files.
pub const API_KEY_VAR: &str = "API_Key";

/// Resolved runtime configuration.
///
/// Built once at startup and handed to the client as a plain value; no
/// component below this layer touches the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Resolve the credential: `API_Key` from the process environment
    /// (after a best-effort load of a local `.env` file), then the config
    /// file written by `wfetch --configure`.
    pub fn load() -> Result<Self> {
        // A missing .env file is fine; a missing key is not.
        dotenvy::dotenv().ok();

        let env_key = env::var(API_KEY_VAR).ok();
        let file = FileConfig::load()?;

        resolve(env_key, file)
    }
}

fn resolve(env_key: Option<String>, file: FileConfig) -> Result<Config> {
    let api_key = env_key.filter(|k| !k.is_empty()).or(file.api_key).ok_or_else(|| {
        anyhow!(
            "No OpenWeather API key found.\n\
             Hint: set {API_KEY_VAR} in the environment (or a local .env file),\n\
             or run `wfetch --configure` to store one."
        )
    })?;

    Ok(Config { api_key })
}

/// On-disk configuration stored as TOML in the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub api_key: Option<String>,
}

impl FileConfig {
    /// Load from disk, or return an empty default if the file doesn't
    /// exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let cfg = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save to disk, creating parent directories as needed. Returns the
    /// path written to.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wfetch", "wfetch")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_wins_over_file() {
        let file = FileConfig { api_key: Some("FILE_KEY".into()) };
        let cfg = resolve(Some("ENV_KEY".into()), file).expect("key must resolve");

        assert_eq!(cfg.api_key, "ENV_KEY");
    }

    #[test]
    fn empty_env_key_falls_through_to_file() {
        let file = FileConfig { api_key: Some("FILE_KEY".into()) };
        let cfg = resolve(Some(String::new()), file).expect("key must resolve");

        assert_eq!(cfg.api_key, "FILE_KEY");
    }

    #[test]
    fn missing_everywhere_errors_with_hint() {
        let err = resolve(None, FileConfig::default()).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key found"));
        assert!(msg.contains("wfetch --configure"));
    }

    #[test]
    fn file_config_parses_api_key() {
        let cfg = FileConfig::from_toml(r#"api_key = "SECRET""#).expect("valid toml");
        assert_eq!(cfg.api_key.as_deref(), Some("SECRET"));
    }

    #[test]
    fn file_config_tolerates_empty_file() {
        let cfg = FileConfig::from_toml("").expect("empty toml is valid");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn file_config_roundtrips_through_toml() {
        let cfg = FileConfig { api_key: Some("SECRET".into()) };
        let toml = toml::to_string_pretty(&cfg).expect("serialize");
        let back = FileConfig::from_toml(&toml).expect("parse back");

        assert_eq!(back.api_key.as_deref(), Some("SECRET"));
    }
}
