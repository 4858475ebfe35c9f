// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod mail;
pub mod storage;

pub use http::HttpFetcher;
pub use mail::ResendMailer;
pub use storage::PgContactStore;
