use crate::domain::model::ContactSubmission;
use crate::domain::ports::ContactStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;

/// Postgres-backed contact store.
///
/// The pool is created lazily: no connection is opened until the first insert,
/// and the table is created on that first use.
pub struct PgContactStore {
    pool: PgPool,
    table: String,
    schema_ready: OnceCell<()>,
}

impl PgContactStore {
    /// `table` must already be a validated SQL identifier.
    pub fn connect_lazy(database_url: &str, table: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_lazy(database_url)?;

        Ok(Self::with_pool(pool, table))
    }

    pub fn with_pool(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: table.to_string(),
            schema_ready: OnceCell::new(),
        }
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::query(&create_table_sql(&self.table))
                    .execute(&self.pool)
                    .await?;
                tracing::info!("🗄️ Contact table '{}' ready", self.table);
                Ok::<(), crate::utils::error::FolioError>(())
            })
            .await?;
        Ok(())
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            user_agent TEXT,
            ip TEXT
        )"
    )
}

fn insert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} (name, email, message, created_at, user_agent, ip) \
         VALUES ($1, $2, $3, $4, $5, $6)"
    )
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<()> {
        self.ensure_schema().await?;

        // 連線只在這個 scope 內持有，drop 時還給 pool
        let mut conn = self.pool.acquire().await?;
        sqlx::query(&insert_sql(&self.table))
            .bind(&submission.name)
            .bind(&submission.email)
            .bind(&submission.message)
            .bind(submission.created_at)
            .bind(submission.request_metadata.user_agent.as_deref())
            .bind(submission.request_metadata.ip.as_deref())
            .execute(&mut *conn)
            .await?;

        tracing::debug!("Stored contact submission from {}", submission.email);
        Ok(())
    }
}
