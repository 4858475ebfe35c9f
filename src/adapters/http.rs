use crate::domain::ports::PageFetcher;
use crate::utils::error::{FolioError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::Client;
use std::time::Duration;

/// reqwest-backed fetcher shared by the scraper and the enrichment pipeline.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            return Err(FolioError::SourceUnavailable {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default().to_ascii_lowercase();
            if !is_textual(&content_type) {
                return Err(FolioError::SourceUnavailable {
                    url: url.to_string(),
                    reason: format!("non-text response ({})", content_type),
                });
            }
        }

        Ok(response.text().await?)
    }
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/") || content_type.contains("html") || content_type.contains("xml")
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        // 逾時後 future 會被丟棄，連線也跟著中斷
        match tokio::time::timeout(timeout, self.get_text(url)).await {
            Ok(result) => result,
            Err(_) => Err(FolioError::Timeout {
                url: url.to_string(),
                millis: timeout.as_millis(),
            }),
        }
    }
}
