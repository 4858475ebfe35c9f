use crate::domain::model::LinkItem;
use indexmap::IndexMap;

/// Combines both sources keyed by URL. Enriched curated items are inserted
/// last, so they replace any primary item with the same URL.
///
/// Order is first-insertion order of each URL: a replaced item keeps the
/// position of the primary item it replaced.
pub fn merge(primary: Vec<LinkItem>, enriched: Vec<LinkItem>) -> Vec<LinkItem> {
    let mut by_url: IndexMap<String, LinkItem> =
        IndexMap::with_capacity(primary.len() + enriched.len());

    for item in primary.into_iter().chain(enriched) {
        by_url.insert(item.url.clone(), item);
    }

    by_url.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: &str, category: Option<&str>) -> LinkItem {
        LinkItem {
            title: title.to_string(),
            url: url.to_string(),
            excerpt: None,
            published_date: None,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_enriched_wins_on_same_url() {
        let mut scraped = item("Scraped title", "https://a.test/p", None);
        scraped.excerpt = Some("scraped excerpt".to_string());
        let curated = item("Curated title", "https://a.test/p", Some("Articles"));

        let merged = merge(vec![scraped], vec![curated.clone()]);

        assert_eq!(merged, vec![curated]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let primary = vec![
            item("Primary one", "https://a.test/1", None),
            item("Primary two", "https://a.test/2", None),
        ];
        let enriched = vec![
            item("Curated two", "https://a.test/2", Some("Articles")),
            item("Curated three", "https://a.test/3", Some("Tutorials")),
        ];

        let first = merge(primary.clone(), enriched.clone());
        let second = merge(primary, enriched);

        let titles: Vec<&str> = first.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Primary one", "Curated two", "Curated three"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_primary_urls_collapse() {
        let primary = vec![
            item("Listing link", "https://a.test/1", None),
            item("Read more link", "https://a.test/1", None),
        ];

        let merged = merge(primary, Vec::new());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Read more link");
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(Vec::new(), Vec::new()).is_empty());
    }
}
