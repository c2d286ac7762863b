//! API key service: token generation, hashing, and resolution.

use rand::Rng;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};

use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::AuthenticatedContext;

/// Issued-token prefix.
const TOKEN_PREFIX: &str = "cur_";
/// Length of the random part of the token (alphanumeric chars).
const TOKEN_RANDOM_LENGTH: usize = 32;
/// Length of the prefix stored for identification in logs.
const TOKEN_PREFIX_LENGTH: usize = 8;

/// A freshly generated token plus the material that goes into the store.
pub struct GeneratedToken {
    /// Full token, shown to the client exactly once.
    pub token: String,
    /// SHA-256 hex digest stored in place of the token.
    pub key_hash: String,
    /// First characters of the token, for identification only.
    pub key_prefix: String,
}

/// Generate a fresh API key token. 32 alphanumeric characters carry well
/// over 128 bits of entropy; collision is treated as impossible.
pub fn generate_token() -> GeneratedToken {
    let random_part: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(TOKEN_RANDOM_LENGTH)
        .map(char::from)
        .collect();

    let token = format!("{TOKEN_PREFIX}{random_part}");
    let key_hash = hash_token(&token);
    let key_prefix = token.chars().take(TOKEN_PREFIX_LENGTH).collect();

    GeneratedToken {
        token,
        key_hash,
        key_prefix,
    }
}

/// Hash a token with SHA-256 for storage and lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Resolve a candidate token to an authenticated identity.
///
/// Lookup is by exact hash equality. A candidate that matches no key, or
/// whose owning user is missing or deactivated, is rejected with
/// `InvalidCredential`; the three cases are indistinguishable to the
/// caller.
pub async fn resolve(
    db: &DatabaseConnection,
    candidate: &str,
) -> AppResult<AuthenticatedContext> {
    let key_hash = hash_token(candidate);

    let api_key = db::api_keys::find_by_hash(db, &key_hash)
        .await?
        .ok_or(AppError::InvalidCredential)?;

    let user = db::users::find_by_id(db, api_key.user_id)
        .await?
        .ok_or(AppError::InvalidCredential)?;

    if !user.active {
        return Err(AppError::InvalidCredential);
    }

    Ok(AuthenticatedContext {
        user_id: user.id,
        username: user.username,
    })
}
