use crate::config::BlogSettings;
use crate::domain::model::RawAnchor;
use crate::domain::ports::PageFetcher;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\shref\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a\s*>"#).unwrap()
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// `9 March 2024` or `2024-03-09`
static LISTING_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,2}\s+[A-Za-z]{3,9}\s+\d{4}|\d{4}-\d{2}-\d{2})\b").unwrap()
});

/// Limits applied while turning a listing page into anchors.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeLimits {
    pub max_items: usize,
    pub min_title_chars: usize,
    pub excerpt_window: usize,
    pub excerpt_chars: usize,
}

impl Default for ScrapeLimits {
    fn default() -> Self {
        Self {
            max_items: 40,
            min_title_chars: 7,
            excerpt_window: 240,
            excerpt_chars: 140,
        }
    }
}

impl From<&BlogSettings> for ScrapeLimits {
    fn from(settings: &BlogSettings) -> Self {
        Self {
            max_items: settings.max_items,
            min_title_chars: settings.min_title_chars,
            excerpt_window: settings.excerpt_window,
            excerpt_chars: settings.excerpt_chars,
        }
    }
}

pub struct PrimarySourceScraper<'a> {
    fetcher: &'a dyn PageFetcher,
    settings: &'a BlogSettings,
}

impl<'a> PrimarySourceScraper<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, settings: &'a BlogSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Fetches the listing page and parses it. Any failure yields an empty list.
    pub async fn scrape(&self) -> Vec<RawAnchor> {
        let source_url = &self.settings.source_url;
        tracing::debug!("Scraping primary source: {}", source_url);

        let html = match self
            .fetcher
            .fetch_text(source_url, self.settings.primary_timeout)
            .await
        {
            Ok(html) => html,
            Err(e) if e.is_degradable() => {
                tracing::warn!("⚠️ Primary source failed, continuing without it: {}", e);
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("❌ Primary source fetch failed unexpectedly, continuing without it: {}", e);
                return Vec::new();
            }
        };

        let base = match Url::parse(source_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("⚠️ Primary source URL is not absolute ({}): {}", source_url, e);
                return Vec::new();
            }
        };

        let anchors = parse_anchors(&html, &base, ScrapeLimits::from(self.settings));
        tracing::info!("📰 Primary source yielded {} anchors", anchors.len());
        anchors
    }
}

/// Scans `html` for anchors, in document order, keeping at most `limits.max_items`.
pub fn parse_anchors(html: &str, base: &Url, limits: ScrapeLimits) -> Vec<RawAnchor> {
    let mut anchors = Vec::new();

    for caps in ANCHOR.captures_iter(html) {
        if anchors.len() >= limits.max_items {
            break;
        }

        let (Some(whole), Some(href), Some(inner)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let title = strip_tags(inner.as_str());
        if title.chars().count() < limits.min_title_chars {
            continue;
        }

        let Some(url) = resolve(base, href.as_str()) else {
            continue;
        };

        let window_end = floor_char_boundary(html, whole.end() + limits.excerpt_window);
        let after = &html[whole.end()..window_end];

        let excerpt: String = strip_tags(after).chars().take(limits.excerpt_chars).collect();
        let excerpt = excerpt.trim();

        anchors.push(RawAnchor {
            title,
            url,
            excerpt_guess: (!excerpt.is_empty()).then(|| excerpt.to_string()),
            date_guess: LISTING_DATE.find(after).map(|m| m.as_str().to_string()),
        });
    }

    anchors
}

/// 去掉標籤、解碼 entity、合併空白
fn strip_tags(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, "");
    let text = html_escape::decode_html_entities(&text);
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// 絕對網址保留原樣，才能跟 curated url 逐字比對
fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    match Url::parse(href) {
        Ok(url) => is_web(&url).then(|| href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = base.join(href).ok()?;
            is_web(&url).then(|| url.into())
        }
        Err(_) => None,
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
