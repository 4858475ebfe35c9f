use crate::utils::error::Result;
use crate::utils::validation::{validate_identifier, validate_url, Validate};
use std::env;

pub const DEFAULT_CONTACTS_TABLE: &str = "contacts";
pub const DEFAULT_EMAIL_FROM: &str = "portfolio@localhost";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Settings for the contact collaborators. A missing value turns the matching
/// collaborator off instead of failing startup or requests.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub database_url: Option<String>,
    pub contacts_table: String,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    pub email_from: String,
    pub email_to: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            contacts_table: DEFAULT_CONTACTS_TABLE.to_string(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            email_to: None,
        }
    }
}

impl ContactConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 空字串跟沒設定一樣處理
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            database_url: get("DATABASE_URL"),
            contacts_table: get("CONTACTS_TABLE").unwrap_or(defaults.contacts_table),
            resend_api_key: get("RESEND_API_KEY"),
            resend_api_url: get("RESEND_API_URL").unwrap_or(defaults.resend_api_url),
            email_from: get("EMAIL_FROM").unwrap_or(defaults.email_from),
            email_to: get("EMAIL_TO"),
        }
    }

    pub fn storage_enabled(&self) -> bool {
        self.database_url.is_some()
    }

    pub fn email_enabled(&self) -> bool {
        self.resend_api_key.is_some() && self.email_to.is_some()
    }

    /// `false` when the sender fell back to [`DEFAULT_EMAIL_FROM`].
    pub fn has_email_from(&self) -> bool {
        self.email_from != DEFAULT_EMAIL_FROM
    }
}

impl Validate for ContactConfig {
    fn validate(&self) -> Result<()> {
        validate_identifier("CONTACTS_TABLE", &self.contacts_table)?;
        validate_url("RESEND_API_URL", &self.resend_api_url)?;
        Ok(())
    }
}
