use crate::config::{AppConfig, ContactConfig, TomlConfig};
use crate::utils::error::{FolioError, Result};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio-api")]
#[command(about = "Portfolio backend: blog aggregation, contact form and project showcase")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, overrides server.bind
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Listing page to scrape, overrides blogs.source_url
    #[arg(long)]
    pub source_url: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Reads the optional TOML file, then applies CLI overrides on top.
    pub fn load(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Some(TomlConfig::from_file(path).map_err(|e| match e {
                    FolioError::IoError(io) => FolioError::ConfigError {
                        message: format!("cannot read '{}': {}", path, io),
                    },
                    other => other,
                })?)
            }
            None => None,
        };

        let mut config = AppConfig::resolve(file, ContactConfig::from_env())?;

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(source_url) = &self.source_url {
            tracing::info!("🔧 Source URL overridden to: {}", source_url);
            config.blogs.source_url = source_url.clone();
        }

        Ok(config)
    }
}
