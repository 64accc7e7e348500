pub mod submissions;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::PersistenceError;
use crate::forms::NewSubmission;

/// Append-only submission log.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn save(&self, submission: &NewSubmission) -> Result<Uuid, PersistenceError>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn save(&self, submission: &NewSubmission) -> Result<Uuid, PersistenceError> {
        let stored = submissions::create(&self.pool, submission).await?;
        Ok(stored.id)
    }
}

/// Apply pending migrations, retrying until the database accepts them.
/// Runs in the background so routes are served while the store is down.
pub async fn migrate_until_ready(pool: &PgPool, retry_every: Duration) {
    loop {
        match sqlx::migrate!("./migrations").run(pool).await {
            Ok(()) => {
                tracing::info!("Database connected, migrations applied");
                return;
            }
            Err(e) => {
                tracing::error!(
                    "Database connection error: {e}; retrying in {}s",
                    retry_every.as_secs_f32()
                );
                tokio::time::sleep(retry_every).await;
            }
        }
    }
}
