use crate::domain::model::{ContactSubmission, OutgoingEmail};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches a remote document as text, giving up once `timeout` elapses.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, submission: &ContactSubmission) -> Result<()>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}
