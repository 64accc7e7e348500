use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::forms::FormKind;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub async fn submit_contact(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    submit(&state, FormKind::Contact, &headers, body).await
}

pub async fn submit_application(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    submit(&state, FormKind::Application, &headers, body).await
}

pub async fn subscribe_newsletter(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    submit(&state, FormKind::Newsletter, &headers, body).await
}

async fn submit(
    state: &SharedState,
    kind: FormKind,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let raw_data = if parser::is_multipart(content_type) {
        parser::parse_multipart(headers, body).await
    } else {
        parser::parse_body(content_type, &body)
    }
    .map_err(AppError::InvalidBody)?;

    pipeline::run(state, kind, &raw_data)
        .await
        .map_err(|error| AppError::Submission { kind, error })?;

    Ok((StatusCode::OK, kind.success_message()).into_response())
}
