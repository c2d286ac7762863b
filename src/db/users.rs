//! Database operations for users.
//!
//! Functions are generic over `ConnectionTrait` so the same queries run on
//! the pool or inside a transaction.

use chrono::Utc;
use sea_orm::*;

use crate::error::AppResult;
use crate::models::User;

/// Insert a new user. A unique violation on username or email surfaces as
/// `Conflict` through the error normalizer.
pub async fn insert<C: ConnectionTrait>(db: &C, username: &str, email: &str) -> AppResult<User> {
    let model = crate::entity::user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    Ok(model_to_user(inserted))
}

/// Find a user by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<Option<User>> {
    let result = crate::entity::user::Entity::find_by_id(id).one(db).await?;
    Ok(result.map(model_to_user))
}

/// Find a user by username.
pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<User>> {
    let result = crate::entity::user::Entity::find()
        .filter(crate::entity::user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(result.map(model_to_user))
}

/// Hard-delete a user row. Returns the number of rows removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<u64> {
    let result = crate::entity::user::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

fn model_to_user(m: crate::entity::user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        active: m.active,
        created_at: m.created_at,
    }
}
