use serde_json::Value;
use uuid::Uuid;

use crate::email::templates::{self, Notice};
use crate::email::OutgoingEmail;
use crate::error::{NoticeStage, PersistenceError, PipelineError};
use crate::forms::{FormKind, NewSubmission};
use crate::state::SharedState;

/// Intake, persist, then notify the submitter and the admin, strictly in that order.
///
/// Nothing is rolled back: once the record is stored a failed notification still
/// fails the request, and the record stays.
pub async fn run(state: &SharedState, kind: FormKind, raw_data: &Value) -> Result<Uuid, PipelineError> {
    let submission = NewSubmission::new(kind, raw_data);
    tracing::info!(form = %kind, fields = submission.form_data.len(), "Received submission");

    let submission_id = persist(state, &submission).await?;
    tracing::info!(form = %kind, %submission_id, "Submission saved");

    let recipient = submission.recipient();
    let notice = templates::submitter_notice(kind, &submission.form_data);
    deliver(state, NoticeStage::Submitter, recipient, notice)
        .await
        .inspect_err(|e| tracing::warn!(%submission_id, "Stored submission left without notification: {e}"))?;

    let notice = templates::admin_notice(kind, &submission.form_data);
    deliver(state, NoticeStage::Admin, state.config.admin_email.clone(), notice)
        .await
        .inspect_err(|e| tracing::warn!(%submission_id, "Stored submission left without notification: {e}"))?;

    Ok(submission_id)
}

async fn persist(state: &SharedState, submission: &NewSubmission) -> Result<Uuid, PersistenceError> {
    if let Some(field) = submission.form_data.missing_field(submission.form_kind) {
        return Err(PersistenceError::MissingField(field));
    }

    tracing::debug!(form = %submission.form_kind, "Saving submission");
    state.store.save(submission).await
}

async fn deliver(
    state: &SharedState,
    stage: NoticeStage,
    to: String,
    notice: Notice,
) -> Result<(), PipelineError> {
    let message = OutgoingEmail {
        from: state.config.smtp.from.clone(),
        to,
        subject: notice.subject,
        html_body: state.layout.wrap(&notice.body),
    };

    tracing::debug!(to = %message.to, "Sending {stage}");
    state
        .mailer
        .send(&message)
        .await
        .map_err(|source| PipelineError::Delivery { stage, source })?;
    tracing::info!("Sent {stage}");

    Ok(())
}
