#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::catalog::CuratedCatalog;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use std::net::SocketAddr;
use std::time::Duration;

pub use env::ContactConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_SOURCE_URL: &str = "https://codewithtanvir.byethost5.com/?i=1";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; FolioBot/1.0)";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Tunables for the blog aggregation.
#[derive(Debug, Clone)]
pub struct BlogSettings {
    pub source_url: String,
    pub user_agent: String,
    pub primary_timeout: Duration,
    pub enrichment_timeout: Duration,
    pub max_items: usize,
    pub min_title_chars: usize,
    pub excerpt_window: usize,
    pub excerpt_chars: usize,
    /// 同時進行的 enrichment 請求上限，預設要大於 catalog 筆數
    pub concurrent_requests: usize,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            primary_timeout: Duration::from_secs(10),
            enrichment_timeout: Duration::from_millis(4000),
            max_items: 40,
            min_title_chars: 7,
            excerpt_window: 240,
            excerpt_chars: 140,
            concurrent_requests: 16,
        }
    }
}

impl Validate for BlogSettings {
    fn validate(&self) -> Result<()> {
        validate_url("blogs.source_url", &self.source_url)?;
        validate_non_empty_string("blogs.user_agent", &self.user_agent)?;
        validate_range(
            "blogs.primary_timeout_seconds",
            self.primary_timeout.as_secs(),
            1,
            120,
        )?;
        validate_range(
            "blogs.enrichment_timeout_ms",
            self.enrichment_timeout.as_millis(),
            100,
            60_000,
        )?;
        validate_positive_number("blogs.max_items", self.max_items, 1)?;
        validate_positive_number("blogs.excerpt_window", self.excerpt_window, 1)?;
        validate_positive_number("blogs.excerpt_chars", self.excerpt_chars, 1)?;
        validate_range("blogs.concurrent_requests", self.concurrent_requests, 1, 256)?;
        Ok(())
    }
}

/// Fully resolved configuration the server starts from.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub blogs: BlogSettings,
    pub catalog: CuratedCatalog,
    pub contact: ContactConfig,
}

impl AppConfig {
    /// Layers the optional TOML file under the environment-driven contact settings.
    pub fn resolve(file: Option<TomlConfig>, contact: ContactConfig) -> Result<Self> {
        let file = file.unwrap_or_default();
        let bind = file.bind_address()?;
        let blogs = file.blog_settings();
        let catalog = file.catalog();

        Ok(Self {
            bind,
            blogs,
            catalog,
            contact,
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.blogs.validate()?;
        self.catalog.validate()?;
        self.contact.validate()?;
        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
