//! HTTP surface: router construction and shared application state.

pub mod routes;

use crate::adapters::{HttpFetcher, PgContactStore, ResendMailer};
use crate::config::AppConfig;
use crate::core::aggregator::BlogAggregator;
use crate::core::contact::{ContactService, Notifier};
use crate::domain::ports::{ContactStore, Mailer};
use crate::utils::error::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<BlogAggregator>,
    pub contact: Arc<ContactService>,
}

impl AppState {
    pub fn new(aggregator: BlogAggregator, contact: ContactService) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            contact: Arc::new(contact),
        }
    }

    /// Wires the real adapters. Collaborators whose settings are missing are left out.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.blogs.user_agent)?);
        let aggregator = BlogAggregator::new(fetcher, config.blogs.clone(), config.catalog.clone());

        let contact_config = &config.contact;
        let store: Option<Arc<dyn ContactStore>> = match &contact_config.database_url {
            Some(url) if contact_config.storage_enabled() => Some(Arc::new(PgContactStore::connect_lazy(
                url,
                &contact_config.contacts_table,
            )?)),
            _ => {
                tracing::warn!("DATABASE_URL not set; contact submissions will not be stored");
                None
            }
        };

        let notifier = match (&contact_config.resend_api_key, &contact_config.email_to) {
            (Some(key), Some(to)) if contact_config.email_enabled() => {
                if !contact_config.has_email_from() {
                    tracing::info!("EMAIL_FROM not set; sending as {}", contact_config.email_from);
                }
                let mailer: Arc<dyn Mailer> =
                    Arc::new(ResendMailer::new(&contact_config.resend_api_url, key)?);
                Some(Notifier {
                    mailer,
                    from: contact_config.email_from.clone(),
                    to: to.clone(),
                })
            }
            _ => {
                tracing::warn!(
                    has_api_key = contact_config.resend_api_key.is_some(),
                    has_email_to = contact_config.email_to.is_some(),
                    has_email_from = contact_config.has_email_from(),
                    "Email delivery disabled"
                );
                None
            }
        };

        Ok(Self::new(aggregator, ContactService::new(store, notifier)))
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/blogs", get(routes::blogs_handler))
        .route("/blogs", get(routes::blogs_handler))
        .route("/api/contact", post(routes::contact_handler))
        .route("/api/projects", get(routes::projects_handler))
        .route("/health", get(routes::health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
