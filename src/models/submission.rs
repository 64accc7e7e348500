use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub form_type: String,
    pub form_data: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}
