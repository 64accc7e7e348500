use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::forms::FormKind;

/// Startup failures. Any of these aborts the process.
#[derive(Debug)]
pub enum ConfigError {
    MissingVar(String),
    InvalidVar { key: String, reason: String },
    Template { path: PathBuf, source: std::io::Error },
    Smtp(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(key) => {
                write!(f, "Missing required environment variable: {key}")
            }
            ConfigError::InvalidVar { key, reason } => write!(f, "Invalid {key}: {reason}"),
            ConfigError::Template { path, source } => {
                write!(f, "Failed to read email template {}: {source}", path.display())
            }
            ConfigError::Smtp(msg) => write!(f, "SMTP configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Template { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum PersistenceError {
    MissingField(&'static str),
    Database(sqlx::Error),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::MissingField(name) => write!(f, "Missing required field: {name}"),
            PersistenceError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Database(err) => Some(err),
            PersistenceError::MissingField(_) => None,
        }
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError::Database(err)
    }
}

#[derive(Debug)]
pub enum DeliveryError {
    InvalidAddress(String),
    Build(String),
    Transport(String),
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::InvalidAddress(msg) => write!(f, "Invalid address: {msg}"),
            DeliveryError::Build(msg) => write!(f, "Failed to build email: {msg}"),
            DeliveryError::Transport(msg) => write!(f, "Failed to send email: {msg}"),
        }
    }
}

impl std::error::Error for DeliveryError {}

/// Which of the two notifications failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeStage {
    Submitter,
    Admin,
}

impl std::fmt::Display for NoticeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeStage::Submitter => f.write_str("submitter confirmation"),
            NoticeStage::Admin => f.write_str("admin notification"),
        }
    }
}

#[derive(Debug)]
pub enum PipelineError {
    Persistence(PersistenceError),
    Delivery {
        stage: NoticeStage,
        source: DeliveryError,
    },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Persistence(err) => write!(f, "Failed to store submission: {err}"),
            PipelineError::Delivery { stage, source } => {
                write!(f, "Failed to deliver {stage}: {source}")
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Persistence(err) => Some(err),
            PipelineError::Delivery { source, .. } => Some(source),
        }
    }
}

impl From<PersistenceError> for PipelineError {
    fn from(err: PersistenceError) -> Self {
        PipelineError::Persistence(err)
    }
}

/// Errors that reach the HTTP boundary. Callers only ever see fixed strings.
#[derive(Debug)]
pub enum AppError {
    InvalidBody(String),
    Submission { kind: FormKind, error: PipelineError },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidBody(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Submission { kind, error } => write!(f, "{}: {error}", kind.label()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidBody(msg) => {
                tracing::warn!("Rejected request body: {msg}");
                (StatusCode::BAD_REQUEST, "Invalid request body.").into_response()
            }
            AppError::Submission { kind, error } => {
                tracing::error!("Error processing {}: {error}", kind.label());
                (StatusCode::INTERNAL_SERVER_ERROR, kind.failure_message()).into_response()
            }
        }
    }
}
