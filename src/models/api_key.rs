//! API key models.

use chrono::{DateTime, Utc};

/// API key row as seen by the service layer. The stored hash is the only
/// credential material; the issued token never comes back from the store.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub id: i64,
    pub user_id: i64,
    pub key_prefix: String,
    pub created_at: DateTime<Utc>,
}

/// Immutable identity attached to a request once its bearer token has been
/// resolved. Threaded by value through the call chain; handlers never touch
/// the raw credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedContext {
    pub user_id: i64,
    pub username: String,
}
