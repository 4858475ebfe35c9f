//! Best-effort page metadata extraction.
//!
//! Works on raw markup with regular expressions instead of a DOM so that broken
//! or truncated documents still yield whatever tags are recognisable.

use crate::domain::model::PageMetadata;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches `<tag key_attr="key_value" value_attr="...">` in either attribute order.
struct AttrPattern {
    forward: Regex,
    reverse: Regex,
}

impl AttrPattern {
    fn new(tag: &str, key_attr: &str, key_value: &str, value_attr: &str) -> Self {
        let key = format!(
            r#"\s{}\s*=\s*["']{}["']"#,
            regex::escape(key_attr),
            regex::escape(key_value)
        );
        let value = format!(
            r#"\s{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
            regex::escape(value_attr)
        );
        let tag = regex::escape(tag);

        let forward = Regex::new(&format!(r"(?i)<{tag}\b[^>]*?{key}[^>]*?{value}"))
            .expect("attribute pattern (forward) must compile");
        let reverse = Regex::new(&format!(r"(?i)<{tag}\b[^>]*?{value}[^>]*?{key}"))
            .expect("attribute pattern (reverse) must compile");

        Self { forward, reverse }
    }

    fn meta(key_attr: &str, key_value: &str) -> Self {
        Self::new("meta", key_attr, key_value, "content")
    }

    fn find(&self, html: &str) -> Option<String> {
        self.forward
            .captures(html)
            .and_then(|caps| quoted_value(&caps))
            .or_else(|| {
                self.reverse
                    .captures(html)
                    .and_then(|caps| quoted_value(&caps))
            })
    }
}

fn quoted_value(caps: &Captures<'_>) -> Option<String> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .and_then(|m| clean(m.as_str()))
}

/// 解碼 HTML entity 後去除空白，空字串視為沒有值
fn clean(raw: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(raw);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

static TITLE_PATTERNS: LazyLock<Vec<AttrPattern>> = LazyLock::new(|| {
    vec![
        AttrPattern::meta("property", "og:title"),
        AttrPattern::meta("property", "twitter:title"),
        AttrPattern::meta("name", "twitter:title"),
    ]
});

static EXCERPT_PATTERNS: LazyLock<Vec<AttrPattern>> = LazyLock::new(|| {
    vec![
        AttrPattern::meta("property", "og:description"),
        AttrPattern::meta("property", "twitter:description"),
        AttrPattern::meta("name", "twitter:description"),
        AttrPattern::meta("name", "description"),
    ]
});

static DATE_PATTERNS: LazyLock<Vec<AttrPattern>> = LazyLock::new(|| {
    vec![
        AttrPattern::meta("property", "article:published_time"),
        AttrPattern::meta("itemprop", "datePublished"),
        AttrPattern::new("time", "itemprop", "datePublished", "datetime"),
    ]
});

static TITLE_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>([^<]+)</title>").unwrap());

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Pulls title, description and publish date out of `html`.
    ///
    /// Pure and infallible: anything unrecognisable comes back as `None`.
    pub fn extract(html: &str) -> PageMetadata {
        if html.trim().is_empty() {
            return PageMetadata::default();
        }

        let title = first_match(&TITLE_PATTERNS, html).or_else(|| {
            TITLE_ELEMENT
                .captures(html)
                .and_then(|caps| caps.get(1))
                .and_then(|m| clean(m.as_str()))
        });

        let excerpt = first_match(&EXCERPT_PATTERNS, html);

        let date = first_match(&DATE_PATTERNS, html)
            .or_else(|| ISO_DATE.find(html).map(|m| m.as_str().to_string()));

        PageMetadata {
            title,
            excerpt,
            date,
        }
    }
}

fn first_match(patterns: &[AttrPattern], html: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| pattern.find(html))
}
