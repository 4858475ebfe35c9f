use crate::domain::model::CuratedEntry;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_unique, validate_url, Validate};
use std::sync::Arc;

/// Read-only list of curated links, shared by every request for the process lifetime.
#[derive(Debug, Clone)]
pub struct CuratedCatalog {
    entries: Arc<[CuratedEntry]>,
}

impl CuratedCatalog {
    pub fn new(entries: Vec<CuratedEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[CuratedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CuratedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CuratedCatalog {
    fn default() -> Self {
        Self::new(vec![
            CuratedEntry::new(
                "Best Practices for C++ Memory Management",
                "https://medium.com/@codewithtanvir/best-practices-for-c-memory-management-avoid-memory-leaks-optimize-performance-11a135b5e2bc",
                "Articles",
            ),
            CuratedEntry::new(
                "Modern JavaScript ES6+ Features You Should Know",
                "https://medium.com/@codewithtanvir/modern-javascript-es6-features-you-should-know-34662ef0954b",
                "Articles",
            ),
            CuratedEntry::new(
                "Building Responsive Layouts with CSS Grid",
                "https://medium.com/@codewithtanvir/building-responsive-layouts-with-css-grid-e0db231cb5e3",
                "Articles",
            ),
            CuratedEntry::new(
                "Data Structures: When to Use What",
                "https://medium.com/@codewithtanvir/data-structures-when-to-use-what-b14aeaadafe5",
                "Articles",
            ),
            CuratedEntry::new(
                "C++ Fundamentals (Playlist)",
                "https://www.youtube.com/playlist?list=PL3ZewXBEAMgcdt7lsFU8fn3SSgkt1k3FY",
                "Tutorials",
            ),
            CuratedEntry::new(
                "Advance C++ Concept",
                "https://www.youtube.com/watch?v=8Bd7VAYBSE4",
                "Tutorials",
            ),
            CuratedEntry::new(
                "C Programming Basics (Playlist)",
                "https://www.youtube.com/playlist?list=PL3ZewXBEAMgcBQ33SbhoVoNMIu74yHJZg",
                "Tutorials",
            ),
            CuratedEntry::new(
                "HTML & CSS Essentials (Playlist)",
                "https://www.youtube.com/playlist?list=PL3ZewXBEAMgdzUJG32at2oTyDIp8t-VG_",
                "Tutorials",
            ),
            CuratedEntry::new(
                "JavaScript Fundamentals",
                "https://www.youtube.com/watch?si=I9yCs73Jvc-IbhRS&v=bnASZOTXwjo&feature=youtu.be",
                "Tutorials",
            ),
        ])
    }
}

impl Validate for CuratedCatalog {
    fn validate(&self) -> Result<()> {
        for (i, entry) in self.iter().enumerate() {
            validate_non_empty_string(&format!("curated[{}].title", i), &entry.title)?;
            validate_url(&format!("curated[{}].url", i), &entry.url)?;
            validate_non_empty_string(&format!("curated[{}].category", i), &entry.category)?;
        }
        validate_unique("curated.url", self.iter().map(|e| e.url.as_str()))
    }
}
