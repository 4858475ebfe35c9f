pub mod aggregator;
pub mod catalog;
pub mod contact;
pub mod enrichment;
pub mod extractor;
pub mod merge;
pub mod projects;
pub mod scraper;

pub use crate::domain::model::{CuratedEntry, LinkItem, PageMetadata, RawAnchor};
pub use crate::domain::ports::{ContactStore, Mailer, PageFetcher};
pub use crate::utils::error::Result;
