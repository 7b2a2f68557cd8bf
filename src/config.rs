use crate::model::listing::DEFAULT_PAGE_SIZE;
use crate::model::mapper::fallback_files;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Directory name under `$HOME` holding config and logs
const CONFIG_DIR_NAME: &str = ".tool-output-tui";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the mapper and the tool output files
    pub tool_output_dir: String,
    /// Rows per page for paginated views
    pub page_size: usize,
    /// Files offered when the mapper cannot be loaded
    pub fallback_files: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_output_dir: "tool-output".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            fallback_files: fallback_files(),
        }
    }
}

/// Terminal viewer for pre-generated tool output files
#[derive(Parser, Debug, Default)]
#[command(name = "tool-output-tui", version, about)]
pub struct Cli {
    /// Directory holding the mapper and tool output files
    #[arg(long)]
    pub dir: Option<String>,

    /// Rows per page in paginated views
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,

    /// Tool output handed over by the host, shown in the header
    #[arg(long)]
    pub host_output: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(CONFIG_DIR_NAME))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log location, next to the config file
    pub fn default_log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("tool-output-tui.log"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        fs::create_dir_all(&config_dir)?;

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Apply command-line overrides on top of this config
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.dir {
            self.tool_output_dir.clone_from(dir);
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = usize::from(page_size);
        }
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    /// CLI over the config file over defaults
    pub fn resolve(cli: &Cli) -> Self {
        Self::load().unwrap_or_default().merge_cli(cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["tool-output-tui", "--dir", "/tmp/out", "--page-size", "25"]);
        let config = Config::default().merge_cli(&cli);

        assert_eq!(config.tool_output_dir, "/tmp/out");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.fallback_files, fallback_files());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"page_size": 5}"#).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.tool_output_dir, "tool-output");
    }

    #[test]
    fn test_zero_page_size_in_file_falls_back() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert_eq!(config.merge_cli(&Cli::default()).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_zero_rejected_on_cli() {
        assert!(Cli::try_parse_from(["tool-output-tui", "--page-size", "0"]).is_err());
    }
}
