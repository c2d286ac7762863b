//! User service: registration, lookup, and deletion.

use sea_orm::TransactionTrait;
use tracing::info;

use crate::db::{self, DbPool};
use crate::error::{AppError, AppResult};
use crate::models::{RegisterResponse, User};
use crate::services::api_key;

/// Register a new user and issue its API key.
///
/// User and ApiKey rows are created in one transaction: a duplicate
/// username or email fails the whole registration and leaves no orphan
/// key behind.
pub async fn register(pool: &DbPool, username: &str, email: &str) -> AppResult<RegisterResponse> {
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    if username.is_empty() {
        return Err(AppError::InvalidInput {
            field: "username",
            message: "username must not be empty".to_string(),
        });
    }
    if email.is_empty() {
        return Err(AppError::InvalidInput {
            field: "email",
            message: "email must not be empty".to_string(),
        });
    }

    let generated = api_key::generate_token();
    let key_hash = generated.key_hash.clone();
    let key_prefix = generated.key_prefix.clone();

    let user = pool
        .connection()
        .transaction::<_, User, AppError>(move |txn| {
            Box::pin(async move {
                let user = db::users::insert(txn, &username, &email).await?;
                db::api_keys::insert(txn, user.id, &key_hash, &key_prefix).await?;
                Ok(user)
            })
        })
        .await
        .map_err(AppError::from)?;

    info!(user_id = user.id, key_prefix = %generated.key_prefix, "registered user");

    Ok(RegisterResponse {
        id: user.id,
        api_key_token: generated.token,
    })
}

/// Fetch a user by id; the caller asked for this exact record, so a miss
/// is an error.
pub async fn get_by_id(pool: &DbPool, id: i64) -> AppResult<User> {
    db::users::find_by_id(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            entity: "user",
            key: id.to_string(),
        })
}

/// Fetch a user by username. Absence is not an error here; callers decide
/// whether a miss is reportable.
pub async fn get_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    db::users::find_by_username(pool.connection(), username).await
}

/// Hard-delete a user and its API key in one transaction. Returns the
/// deleted snapshot.
pub async fn delete_by_id(pool: &DbPool, id: i64) -> AppResult<User> {
    let user = pool
        .connection()
        .transaction::<_, User, AppError>(move |txn| {
            Box::pin(async move {
                let user = db::users::find_by_id(txn, id)
                    .await?
                    .ok_or_else(|| AppError::NotFound {
                        entity: "user",
                        key: id.to_string(),
                    })?;

                db::api_keys::delete_by_user(txn, user.id).await?;
                db::users::delete(txn, user.id).await?;
                Ok(user)
            })
        })
        .await
        .map_err(AppError::from)?;

    info!(user_id = user.id, "deleted user");
    Ok(user)
}
