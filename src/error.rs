//! Domain error types and the store-fault normalizer.
//!
//! Every failure a handler can surface is one of the `AppError` kinds
//! below. Store-layer faults are classified exactly once, in the
//! `From<DbErr>` impl: unique-constraint violations become field-addressed
//! `Conflict`s, everything else collapses into `Unavailable`. Downstream
//! code never re-inspects the underlying driver error.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr, TransactionError};
use serde::Serialize;
use utoipa::ToSchema;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Authorization header absent or not a `Bearer` credential.
    #[error("missing or malformed Authorization header")]
    MissingCredential,

    /// Credential present but does not resolve to an active user.
    #[error("invalid API key")]
    InvalidCredential,

    /// Unique-constraint violation on a caller-supplied field.
    #[error("this {field} already exists")]
    Conflict { field: &'static str },

    /// Point lookup missed and the caller asked for the record.
    #[error("no {entity} found for {key}")]
    NotFound { entity: &'static str, key: String },

    /// Caller-supplied value failed validation before any store call.
    #[error("{message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    /// Send target does not exist.
    #[error("no user named {username}")]
    UnknownRecipient { username: String },

    /// Conversation peer does not exist.
    #[error("no user named {username}")]
    UnknownPeer { username: String },

    #[error("cannot send a message to yourself")]
    SelfMessage,

    #[error("cannot read a conversation with yourself")]
    SelfConversation,

    /// Opaque server fault. The detail is logged, never sent to clients.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    /// Which request field a client fault is addressed to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingCredential | Self::InvalidCredential => "authorization",
            Self::Conflict { field } => field,
            Self::NotFound { entity, .. } => entity,
            Self::InvalidInput { field, .. } => field,
            Self::UnknownRecipient { .. } | Self::SelfMessage => "dst",
            Self::UnknownPeer { .. } | Self::SelfConversation => "peer",
            Self::Unavailable(_) => "",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } | Self::UnknownRecipient { .. } | Self::UnknownPeer { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidInput { .. } | Self::SelfMessage | Self::SelfConversation => {
                StatusCode::BAD_REQUEST
            }
            Self::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Unavailable(detail) = self {
            tracing::error!(detail = %detail, "storage fault");
            return HttpResponse::InternalServerError().json(ErrorResponse {
                status: "error",
                message: "internal server error".to_string(),
            });
        }

        let mut data = serde_json::Map::new();
        data.insert(
            self.field().to_string(),
            serde_json::Value::String(self.to_string()),
        );
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "fail",
            "data": data,
        }))
    }
}

/// Server-fault response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Recover which unique column a constraint violation names. Works against
/// both PostgreSQL ("users_username_key") and SQLite ("users.username")
/// violation text.
fn unique_violation_field(detail: &str) -> Option<&'static str> {
    ["username", "email", "key_hash"]
        .into_iter()
        .find(|field| detail.contains(field))
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                match unique_violation_field(&detail) {
                    Some(field) => AppError::Conflict { field },
                    None => AppError::Unavailable(detail),
                }
            }
            _ => AppError::Unavailable(err.to_string()),
        }
    }
}

impl From<TransactionError<AppError>> for AppError {
    fn from(err: TransactionError<AppError>) -> Self {
        match err {
            TransactionError::Connection(e) => e.into(),
            TransactionError::Transaction(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_field() {
        assert_eq!(
            unique_violation_field(
                "duplicate key value violates unique constraint \"users_username_key\""
            ),
            Some("username")
        );
        assert_eq!(
            unique_violation_field("UNIQUE constraint failed: users.email"),
            Some("email")
        );
        assert_eq!(
            unique_violation_field("UNIQUE constraint failed: api_keys.key_hash"),
            Some("key_hash")
        );
        assert_eq!(unique_violation_field("connection reset"), None);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Conflict { field: "username" }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound {
                entity: "user",
                key: "7".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::SelfMessage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Unavailable("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_fault_fields() {
        assert_eq!(AppError::InvalidCredential.field(), "authorization");
        assert_eq!(AppError::Conflict { field: "email" }.field(), "email");
        assert_eq!(
            AppError::UnknownRecipient {
                username: "bob".to_string()
            }
            .field(),
            "dst"
        );
        assert_eq!(AppError::SelfConversation.field(), "peer");
    }
}
