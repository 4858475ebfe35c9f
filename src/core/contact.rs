use crate::domain::model::{
    ContactForm, ContactOutcome, ContactSubmission, OutgoingEmail, RequestMetadata,
};
use crate::domain::ports::{ContactStore, Mailer};
use crate::utils::error::{FolioError, Result};
use chrono::Utc;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_EMAIL: &str = "Invalid email";

/// Mail collaborator plus the fixed sender and recipient.
pub struct Notifier {
    pub mailer: Arc<dyn Mailer>,
    pub from: String,
    pub to: String,
}

/// Validates contact submissions, stores them and sends a notification.
///
/// Either collaborator may be absent; a disabled collaborator is skipped.
#[derive(Default)]
pub struct ContactService {
    store: Option<Arc<dyn ContactStore>>,
    notifier: Option<Notifier>,
}

impl ContactService {
    pub fn new(store: Option<Arc<dyn ContactStore>>, notifier: Option<Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn storage_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn email_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub async fn submit(&self, form: ContactForm, metadata: RequestMetadata) -> Result<ContactOutcome> {
        let submission = normalize(form, metadata)?;

        let stored = match &self.store {
            Some(store) => {
                store.insert(&submission).await?;
                true
            }
            None => {
                tracing::info!("Contact storage disabled; submission from {} not persisted", submission.email);
                false
            }
        };

        let email_sent = match &self.notifier {
            Some(notifier) => {
                let email = compose_email(&submission, &notifier.from, &notifier.to);
                match notifier.mailer.send(&email).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!("⚠️ Contact email failed, submission kept: {}", e);
                        false
                    }
                }
            }
            None => {
                tracing::info!("Email delivery not configured; skipping notification");
                false
            }
        };

        Ok(ContactOutcome {
            ok: true,
            stored,
            email_sent,
        })
    }
}

fn normalize(form: ContactForm, request_metadata: RequestMetadata) -> Result<ContactSubmission> {
    let name = form.name.trim();
    let email = form.email.trim();
    let message = form.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(FolioError::ValidationError {
            message: MISSING_FIELDS.to_string(),
        });
    }
    if !EMAIL.is_match(email) {
        return Err(FolioError::ValidationError {
            message: INVALID_EMAIL.to_string(),
        });
    }

    Ok(ContactSubmission {
        name: name.to_string(),
        email: email.to_lowercase(),
        message: message.to_string(),
        created_at: Utc::now(),
        request_metadata,
    })
}

pub fn compose_email(submission: &ContactSubmission, from: &str, to: &str) -> OutgoingEmail {
    let text = format!(
        "Name: {}\nEmail: {}\n\n{}",
        submission.name, submission.email, submission.message
    );

    let escape = |s: &str| html_escape::encode_safe(s).into_owned();
    let meta = &submission.request_metadata;
    let html = format!(
        "<h2>New Contact Message</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Message:</strong></p>\
         <p>{}</p>\
         <hr/>\
         <small>IP: {} • UA: {}</small>",
        escape(&submission.name),
        escape(&submission.email),
        escape(&submission.message).replace('\n', "<br/>"),
        escape(meta.ip.as_deref().unwrap_or_default()),
        escape(meta.user_agent.as_deref().unwrap_or_default()),
    );

    OutgoingEmail {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("New portfolio message from {}", submission.name),
        text,
        html,
        reply_to: Some(submission.email.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        rows: Mutex<Vec<ContactSubmission>>,
        fail: bool,
    }

    #[async_trait]
    impl ContactStore for MockStore {
        async fn insert(&self, submission: &ContactSubmission) -> Result<()> {
            if self.fail {
                return Err(FolioError::Unexpected {
                    message: "database down".to_string(),
                });
            }
            self.rows.lock().await.push(submission.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockMailer {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<()> {
            if self.fail {
                return Err(FolioError::SourceUnavailable {
                    url: "https://api.resend.com/emails".to_string(),
                    reason: "HTTP 500".to_string(),
                });
            }
            self.sent.lock().await.push(email.clone());
            Ok(())
        }
    }

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    fn notifier(mailer: Arc<MockMailer>) -> Notifier {
        Notifier {
            mailer,
            from: "portfolio@example.com".to_string(),
            to: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submission_is_normalized_stored_and_mailed() {
        let store = Arc::new(MockStore::default());
        let mailer = Arc::new(MockMailer::default());
        let service = ContactService::new(
            Some(store.clone() as Arc<dyn ContactStore>),
            Some(notifier(mailer.clone())),
        );

        let metadata = RequestMetadata {
            user_agent: Some("curl/8".to_string()),
            ip: Some("203.0.113.9".to_string()),
        };
        let outcome = service
            .submit(form("  Ada ", " Ada@Example.COM ", " Hello <there>\nbye "), metadata)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ContactOutcome {
                ok: true,
                stored: true,
                email_sent: true
            }
        );

        let rows = store.rows.lock().await;
        assert_eq!(rows[0].name, "Ada");
        assert_eq!(rows[0].email, "ada@example.com");
        assert_eq!(rows[0].message, "Hello <there>\nbye");
        assert_eq!(rows[0].request_metadata.ip.as_deref(), Some("203.0.113.9"));

        let sent = mailer.sent.lock().await;
        assert_eq!(sent[0].subject, "New portfolio message from Ada");
        assert_eq!(sent[0].reply_to.as_deref(), Some("ada@example.com"));
        assert!(sent[0].html.contains("Hello &lt;there&gt;<br/>bye"));
        assert!(sent[0].text.ends_with("\n\nHello <there>\nbye"));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let service = ContactService::default();
        let err = service
            .submit(form("Ada", "   ", "Hi"), RequestMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::ValidationError { ref message } if message == MISSING_FIELDS));
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let service = ContactService::default();
        for bad in ["ada", "ada@example", "a da@example.com", "@example.com"] {
            let err = service
                .submit(form("Ada", bad, "Hi"), RequestMetadata::default())
                .await
                .unwrap_err();
            assert!(matches!(err, FolioError::ValidationError { ref message } if message == INVALID_EMAIL));
        }
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_fail_submission() {
        let store = Arc::new(MockStore::default());
        let mailer = Arc::new(MockMailer {
            fail: true,
            ..Default::default()
        });
        let service = ContactService::new(
            Some(store.clone() as Arc<dyn ContactStore>),
            Some(notifier(mailer)),
        );

        let outcome = service
            .submit(form("Ada", "ada@example.com", "Hi"), RequestMetadata::default())
            .await
            .unwrap();

        assert!(outcome.stored);
        assert!(!outcome.email_sent);
        assert_eq!(store.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_collaborators_still_succeed() {
        let service = ContactService::default();
        let outcome = service
            .submit(form("Ada", "ada@example.com", "Hi"), RequestMetadata::default())
            .await
            .unwrap();

        assert!(outcome.ok);
        assert!(!outcome.stored);
        assert!(!outcome.email_sent);
    }

    #[tokio::test]
    async fn test_storage_failure_is_surfaced() {
        let store = Arc::new(MockStore {
            fail: true,
            ..Default::default()
        });
        let service = ContactService::new(Some(store as Arc<dyn ContactStore>), None);

        let result = service
            .submit(form("Ada", "ada@example.com", "Hi"), RequestMetadata::default())
            .await;

        assert!(result.is_err());
    }
}
