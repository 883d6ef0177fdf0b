//! Startup configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional YAML file (`--config`), then command-line flags and `LISTEN`.
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:4221"
//!   max_request_size: 1024
//! static_files:
//!   directory: /srv/files
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::http::connection::MAX_REQUEST_SIZE;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4221";

#[derive(Parser, Debug, Default)]
#[command(name = "courier")]
#[command(about = "Minimal HTTP/1.1 file and echo server", long_about = None)]
pub struct Cli {
    /// Directory to serve files from
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Size in bytes of the single read made per connection
    #[arg(long)]
    pub max_request_size: Option<usize>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub max_request_size: usize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub directory: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            max_request_size: MAX_REQUEST_SIZE,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Loads configuration from an explicit argument list (first item is the
    /// program name).
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::from_cli(cli)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(yaml).context("invalid YAML configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_yaml_str(&raw)?
            }
            None => Self::default(),
        };

        if let Some(directory) = cli.directory {
            cfg.static_files.directory = directory;
        }
        if let Some(listen) = cli.listen {
            cfg.server.listen_addr = listen;
        }
        if let Some(size) = cli.max_request_size {
            cfg.server.max_request_size = size;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.max_request_size == 0 {
            anyhow::bail!("max_request_size must be greater than zero");
        }
        Ok(())
    }
}
