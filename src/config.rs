use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::cli::Cli;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_PER_PAGE: usize = 100;

/// Optional TOML file supplying defaults for the global options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl FileConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let config: FileConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration file")?;

        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub per_page: usize,
    pub verbose: bool,
}

impl Settings {
    /// CLI has precedence, then the config file, then built-in defaults.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config_file {
            Some(path) => FileConfig::from_toml(path)?,
            None => FileConfig::default(),
        };
        Ok(Settings {
            api_url: cli
                .api_url
                .clone()
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            per_page: cli.per_page.or(file.per_page).unwrap_or(DEFAULT_PER_PAGE),
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["repo-miner"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["summarize", "--commits", "c.csv", "--issues", "i.csv"]);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(&parse(&[])).unwrap();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.per_page, DEFAULT_PER_PAGE);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"https://ghe.example.com/api/v3\"\nper_page = 25\n")
            .unwrap();

        let cli = parse(&["--config-file", path.to_str().unwrap()]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(settings.per_page, 25);
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "per_page = 25\n").unwrap();

        let cli = parse(&["--config-file", path.to_str().unwrap(), "--per-page", "5"]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.per_page, 5);
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = parse(&["--config-file", "/no/such/config.toml"]);
        assert!(Settings::resolve(&cli).is_err());
    }
}
