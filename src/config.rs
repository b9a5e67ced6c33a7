//! Server configuration.
//!
//! Values come from command-line flags first, then an optional YAML file,
//! then built-in defaults. The resulting [`Config`] is immutable and handed
//! to the listener at startup.
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:4221"
//!   max_connections: 512
//! files:
//!   directory: /tmp/skiff
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(name = "skiff", about = "Minimal HTTP/1.1 echo and file server")]
struct Cli {
    /// Directory backing the /files/ routes
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to bind, e.g. 0.0.0.0:4221
    #[arg(long, env = "LISTEN")]
    listen: Option<String>,

    /// Upper bound on concurrently served connections
    #[arg(long = "max-connections")]
    max_connections: Option<usize>,

    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Shape of the optional YAML configuration file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub files: FilesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub listen_addr: Option<String>,
    pub max_connections: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Root of the file store. `None` makes every `/files/` request a 404.
    pub directory: Option<PathBuf>,
    /// `None` keeps connection spawning unbounded.
    pub max_connections: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            max_connections: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the process arguments. Exits the
    /// process on `--help` or unparseable flags, like any clap binary.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Builds the configuration from an explicit argument list. The first
    /// item is the program name, as with `std::env::args`.
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_cli(Cli::try_parse_from(args)?)
    }

    fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => FileConfig::default(),
        };

        let defaults = Config::default();
        let cfg = Config {
            listen_addr: cli
                .listen
                .or(file.server.listen_addr)
                .unwrap_or(defaults.listen_addr),
            directory: cli.directory.or(file.files.directory),
            max_connections: cli.max_connections.or(file.server.max_connections),
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<FileConfig> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(FileConfig::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_connections == Some(0) {
            anyhow::bail!("max_connections must be at least 1");
        }
        if self.listen_addr.trim().is_empty() {
            anyhow::bail!("listen address must not be empty");
        }
        Ok(())
    }
}
