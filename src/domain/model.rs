use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One aggregated blog entry. `url` is the identity used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(rename = "date", skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Hand-maintained seed link, guaranteed to appear in every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedEntry {
    pub title: String,
    pub url: String,
    pub category: String,
}

impl CuratedEntry {
    pub fn new(title: &str, url: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        }
    }
}

/// Anchor pulled off the primary listing page before it becomes a [`LinkItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnchor {
    pub title: String,
    pub url: String,
    pub excerpt_guess: Option<String>,
    pub date_guess: Option<String>,
}

impl From<RawAnchor> for LinkItem {
    fn from(anchor: RawAnchor) -> Self {
        LinkItem {
            title: anchor.title,
            url: anchor.url,
            excerpt: anchor.excerpt_guess,
            published_date: anchor.date_guess,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
}

impl PageMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.excerpt.is_none() && self.date.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogsResponse {
    pub items: Vec<LinkItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BlogsResponse {
    pub fn ok(items: Vec<LinkItem>) -> Self {
        Self { items, error: None }
    }

    pub fn failed() -> Self {
        Self {
            items: Vec::new(),
            error: Some("failed_to_fetch".to_string()),
        }
    }
}

/// Raw contact form body. Missing fields deserialize as empty strings so that
/// validation, not the JSON extractor, decides the response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub request_metadata: RequestMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOutcome {
    pub ok: bool,
    pub stored: bool,
    pub email_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub stack: &'static str,
    pub href: &'static str,
    pub description: &'static str,
}
