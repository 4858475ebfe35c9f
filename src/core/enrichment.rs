use crate::core::extractor::MetadataExtractor;
use crate::domain::model::{CuratedEntry, LinkItem, PageMetadata};
use crate::domain::ports::PageFetcher;
use crate::utils::error::{FolioError, Result};
use futures::stream::{self, StreamExt};
use std::time::Duration;

/// Augments curated entries with metadata scraped from their own pages.
///
/// Fetches run concurrently (at most `concurrency` in flight) and each one has
/// its own timeout. A failed fetch degrades that entry to its curated fields.
pub struct EnrichmentPipeline<'a> {
    fetcher: &'a dyn PageFetcher,
    timeout: Duration,
    concurrency: usize,
}

impl<'a> EnrichmentPipeline<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, timeout: Duration, concurrency: usize) -> Self {
        Self {
            fetcher,
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// One output item per input entry, in input order.
    pub async fn enrich(&self, entries: &[CuratedEntry]) -> Vec<LinkItem> {
        // buffered 會保留輸入順序
        stream::iter(entries.iter().cloned())
            .map(|entry| self.enrich_one(entry))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn enrich_one(&self, entry: CuratedEntry) -> LinkItem {
        let metadata = match self.fetch_metadata(&entry.url).await {
            Ok(metadata) => metadata,
            Err(e) if e.is_degradable() => {
                tracing::debug!("Enrichment skipped, using curated fields: {}", e);
                PageMetadata::default()
            }
            Err(e) => {
                tracing::warn!("⚠️ Enrichment failed unexpectedly for {}: {}", entry.url, e);
                PageMetadata::default()
            }
        };

        LinkItem {
            title: metadata.title.unwrap_or(entry.title),
            url: entry.url,
            excerpt: metadata.excerpt,
            published_date: metadata.date,
            category: Some(entry.category),
        }
    }

    /// A page with nothing recognisable counts as a [`FolioError::ExtractionFailure`].
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata> {
        let html = self.fetcher.fetch_text(url, self.timeout).await?;
        let metadata = MetadataExtractor::extract(&html);
        if metadata.is_empty() {
            return Err(FolioError::ExtractionFailure {
                url: url.to_string(),
                reason: "no recognisable metadata".to_string(),
            });
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::HttpFetcher;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::time::Instant;

    struct MockFetcher {
        pages: HashMap<String, String>,
    }

    impl MockFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch_text(&self, url: &str, _timeout: Duration) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FolioError::SourceUnavailable {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_extracted_fields_override_curated_title() {
        let fetcher = MockFetcher::new(&[(
            "https://a.test/post",
            r#"<meta property="og:title" content="Scraped Title">
               <meta name="description" content="Scraped excerpt">
               <meta property="article:published_time" content="2024-01-02">"#,
        )]);
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_secs(4), 4);
        let entries = vec![CuratedEntry::new("Curated", "https://a.test/post", "Articles")];

        let items = pipeline.enrich(&entries).await;

        assert_eq!(
            items,
            vec![LinkItem {
                title: "Scraped Title".to_string(),
                url: "https://a.test/post".to_string(),
                excerpt: Some("Scraped excerpt".to_string()),
                published_date: Some("2024-01-02".to_string()),
                category: Some("Articles".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_extraction_keeps_curated_fields() {
        let fetcher = MockFetcher::new(&[("https://a.test/plain", "<p>nothing useful here</p>")]);
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_secs(4), 4);
        let entries = vec![CuratedEntry::new("Curated", "https://a.test/plain", "Tutorials")];

        let items = pipeline.enrich(&entries).await;

        assert_eq!(items[0].title, "Curated");
        assert_eq!(items[0].category.as_deref(), Some("Tutorials"));
        assert_eq!(items[0].excerpt, None);
        assert_eq!(items[0].published_date, None);
    }

    #[tokio::test]
    async fn test_empty_page_is_an_extraction_failure() {
        let fetcher = MockFetcher::new(&[("https://a.test/plain", "<p>nothing useful here</p>")]);
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_secs(4), 4);

        let err = pipeline.fetch_metadata("https://a.test/plain").await.unwrap_err();
        assert!(matches!(err, FolioError::ExtractionFailure { ref url, .. } if url == "https://a.test/plain"));
        assert!(err.is_degradable());

        let err = pipeline.fetch_metadata("https://a.test/missing").await.unwrap_err();
        assert!(matches!(err, FolioError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_yields_curated_item() {
        // 沒有服務在 port 1 監聽
        let fetcher = HttpFetcher::new("folio-api-test/1.0").unwrap();
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_secs(4), 4);
        let entries = vec![CuratedEntry::new("X", "http://127.0.0.1:1/", "Articles")];

        let items = pipeline.enrich(&entries).await;

        assert_eq!(
            items,
            vec![LinkItem {
                title: "X".to_string(),
                url: "http://127.0.0.1:1/".to_string(),
                excerpt: None,
                published_date: None,
                category: Some("Articles".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_order_and_length_are_preserved() {
        let fetcher = MockFetcher::new(&[
            ("https://a.test/1", r#"<title>First page</title>"#),
            ("https://a.test/3", r#"<title>Third page</title>"#),
        ]);
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_secs(4), 2);
        let entries = vec![
            CuratedEntry::new("One", "https://a.test/1", "Articles"),
            CuratedEntry::new("Two", "https://a.test/2", "Articles"),
            CuratedEntry::new("Three", "https://a.test/3", "Tutorials"),
        ];

        let items = pipeline.enrich(&entries).await;

        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First page", "Two", "Third page"]);
    }

    #[tokio::test]
    async fn test_slow_page_does_not_block_others() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(5))
                .body("<title>Too late</title>");
        });
        let fast = server.mock(|when, then| {
            when.method(GET).path("/fast");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<title>Fast page</title>");
        });

        let fetcher = HttpFetcher::new("folio-api-test/1.0").unwrap();
        let pipeline = EnrichmentPipeline::new(&fetcher, Duration::from_millis(300), 8);
        let entries = vec![
            CuratedEntry::new("Slow curated", &server.url("/slow"), "Articles"),
            CuratedEntry::new("Fast curated", &server.url("/fast"), "Articles"),
        ];

        let started = Instant::now();
        let items = pipeline.enrich(&entries).await;

        assert!(started.elapsed() < Duration::from_secs(3));
        fast.assert();
        assert_eq!(items[0].title, "Slow curated");
        assert_eq!(items[1].title, "Fast page");
    }
}
