use crate::config::BlogSettings;
use crate::core::catalog::CuratedCatalog;
use crate::core::enrichment::EnrichmentPipeline;
use crate::core::merge::merge;
use crate::core::scraper::PrimarySourceScraper;
use crate::domain::model::LinkItem;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{FolioError, Result};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates one blog aggregation: primary scrape and curated enrichment run
/// side by side, then the results are merged. Holds no per-request state.
pub struct BlogAggregator {
    fetcher: Arc<dyn PageFetcher>,
    settings: BlogSettings,
    catalog: CuratedCatalog,
}

impl BlogAggregator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, settings: BlogSettings, catalog: CuratedCatalog) -> Self {
        Self {
            fetcher,
            settings,
            catalog,
        }
    }

    /// Runs the aggregation. Per-source failures are already absorbed below this
    /// point, so the only error is [`FolioError::Unexpected`] (a panic inside a
    /// stage).
    pub async fn run(&self) -> Result<Vec<LinkItem>> {
        AssertUnwindSafe(self.aggregate())
            .catch_unwind()
            .await
            .map_err(|panic| {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "aggregation panicked".to_string());
                FolioError::Unexpected { message }
            })
    }

    async fn aggregate(&self) -> Vec<LinkItem> {
        let started = Instant::now();
        let fetcher = self.fetcher.as_ref();

        let scraper = PrimarySourceScraper::new(fetcher, &self.settings);
        let enrichment = EnrichmentPipeline::new(
            fetcher,
            self.settings.enrichment_timeout,
            self.settings.concurrent_requests,
        );

        let (anchors, enriched) =
            tokio::join!(scraper.scrape(), enrichment.enrich(self.catalog.entries()));

        if anchors.is_empty() {
            tracing::info!("📚 Primary source empty, returning curated-only list");
        }

        let primary: Vec<LinkItem> = anchors.into_iter().map(LinkItem::from).collect();
        let items = merge(primary, enriched);

        tracing::info!(
            "✅ Aggregated {} items in {:?}",
            items.len(),
            started.elapsed()
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::HttpFetcher;
    use crate::domain::model::CuratedEntry;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn settings(source_url: String) -> BlogSettings {
        BlogSettings {
            source_url,
            primary_timeout: Duration::from_millis(500),
            enrichment_timeout: Duration::from_millis(500),
            ..BlogSettings::default()
        }
    }

    fn fetcher() -> Arc<dyn PageFetcher> {
        Arc::new(HttpFetcher::new("folio-api-test/1.0").unwrap())
    }

    #[tokio::test]
    async fn test_curated_item_replaces_scraped_duplicate() {
        let server = MockServer::start();
        let listing = format!(
            r#"<a href="{}">Scraped duplicate title</a><p>2024-01-01</p>
               <a href="/posts/only-primary">Only on the primary source</a>"#,
            server.url("/curated")
        );
        let listing_mock = server.mock(|when, then| {
            when.method(GET).path("/listing");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(listing);
        });
        server.mock(|when, then| {
            when.method(GET).path("/curated");
            then.status(200)
                .header("Content-Type", "text/html")
                .body(r#"<meta property="og:title" content="Enriched title">"#);
        });

        let catalog = CuratedCatalog::new(vec![CuratedEntry::new(
            "Curated title",
            &server.url("/curated"),
            "Articles",
        )]);
        let aggregator = BlogAggregator::new(fetcher(), settings(server.url("/listing")), catalog);

        let items = aggregator.run().await.unwrap();

        listing_mock.assert();
        assert_eq!(items.len(), 2);
        let curated: Vec<&LinkItem> = items
            .iter()
            .filter(|i| i.url == server.url("/curated"))
            .collect();
        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].title, "Enriched title");
        assert_eq!(curated[0].category.as_deref(), Some("Articles"));
        assert_eq!(curated[0].published_date, None);
        assert!(items.iter().any(|i| i.url == server.url("/posts/only-primary")));
    }

    #[tokio::test]
    async fn test_everything_failing_is_an_empty_success() {
        let catalog = CuratedCatalog::new(Vec::new());
        let aggregator = BlogAggregator::new(
            fetcher(),
            settings("http://127.0.0.1:1/".to_string()),
            catalog,
        );

        let items = aggregator.run().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_hung_primary_source_is_bounded() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/hang");
            then.status(200).delay(Duration::from_secs(10)).body("<a href=\"/x\">Never seen</a>");
        });
        server.mock(|when, then| {
            when.method(GET).path("/curated");
            then.status(200).delay(Duration::from_secs(10)).body("<title>Never seen</title>");
        });

        let catalog = CuratedCatalog::new(vec![CuratedEntry::new(
            "Curated title",
            &server.url("/curated"),
            "Tutorials",
        )]);
        let aggregator = BlogAggregator::new(fetcher(), settings(server.url("/hang")), catalog);

        let started = Instant::now();
        let items = aggregator.run().await.unwrap();

        // 上限是 primary + enrichment 的逾時
        assert!(started.elapsed() < Duration::from_millis(500 + 500 + 1500));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Curated title");
    }

    struct PanickingFetcher;

    #[async_trait]
    impl PageFetcher for PanickingFetcher {
        async fn fetch_text(&self, _url: &str, _timeout: Duration) -> Result<String> {
            panic!("fetcher exploded");
        }
    }

    #[tokio::test]
    async fn test_panic_becomes_unexpected_failure() {
        let aggregator = BlogAggregator::new(
            Arc::new(PanickingFetcher),
            BlogSettings::default(),
            CuratedCatalog::default(),
        );

        let err = aggregator.run().await.unwrap_err();
        assert!(matches!(err, FolioError::Unexpected { ref message } if message == "fetcher exploded"));
    }
}
