pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{AppConfig, BlogSettings};
pub use core::{aggregator::BlogAggregator, catalog::CuratedCatalog, contact::ContactService};
pub use server::{build_app, AppState};
pub use utils::error::{FolioError, Result};
