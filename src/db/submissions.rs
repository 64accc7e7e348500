use sqlx::PgPool;
use uuid::Uuid;

use crate::forms::NewSubmission;
use crate::models::Submission;

pub async fn create(pool: &PgPool, submission: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (id, form_type, form_data)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(submission.form_kind.label())
    .bind(submission.form_data.to_value())
    .fetch_one(pool)
    .await
}

/// Operator lookup. The request path only ever inserts.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
