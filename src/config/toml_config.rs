use crate::config::{BlogSettings, DEFAULT_BIND};
use crate::core::catalog::CuratedCatalog;
use crate::domain::model::CuratedEntry;
use crate::utils::error::{FolioError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// On-disk configuration. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub blogs: BlogsConfig,
    pub curated: Option<Vec<CuratedEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogsConfig {
    pub source_url: Option<String>,
    pub user_agent: Option<String>,
    pub primary_timeout_seconds: Option<u64>,
    pub enrichment_timeout_ms: Option<u64>,
    pub max_items: Option<usize>,
    pub min_title_chars: Option<usize>,
    pub excerpt_window: Option<usize>,
    pub excerpt_chars: Option<usize>,
    pub concurrent_requests: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FolioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SOURCE_URL})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        let bind = self.server.bind.as_deref().unwrap_or(DEFAULT_BIND);
        bind.parse()
            .map_err(|e: std::net::AddrParseError| FolioError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: bind.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn blog_settings(&self) -> BlogSettings {
        let defaults = BlogSettings::default();
        let blogs = &self.blogs;

        BlogSettings {
            source_url: blogs.source_url.clone().unwrap_or(defaults.source_url),
            user_agent: blogs.user_agent.clone().unwrap_or(defaults.user_agent),
            primary_timeout: blogs
                .primary_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.primary_timeout),
            enrichment_timeout: blogs
                .enrichment_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.enrichment_timeout),
            max_items: blogs.max_items.unwrap_or(defaults.max_items),
            min_title_chars: blogs.min_title_chars.unwrap_or(defaults.min_title_chars),
            excerpt_window: blogs.excerpt_window.unwrap_or(defaults.excerpt_window),
            excerpt_chars: blogs.excerpt_chars.unwrap_or(defaults.excerpt_chars),
            concurrent_requests: blogs
                .concurrent_requests
                .unwrap_or(defaults.concurrent_requests),
        }
    }

    /// `[[curated]]` 有設定時取代內建清單
    pub fn catalog(&self) -> CuratedCatalog {
        match &self.curated {
            Some(entries) => CuratedCatalog::new(entries.clone()),
            None => CuratedCatalog::default(),
        }
    }
}
