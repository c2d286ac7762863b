//! Database operations for API keys.

use chrono::Utc;
use sea_orm::*;

use crate::error::AppResult;
use crate::models::ApiKey;

/// Insert the API key row for a freshly created user.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    user_id: i64,
    key_hash: &str,
    key_prefix: &str,
) -> AppResult<ApiKey> {
    let model = crate::entity::api_key::ActiveModel {
        user_id: Set(user_id),
        key_hash: Set(key_hash.to_string()),
        key_prefix: Set(key_prefix.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    Ok(model_to_api_key(inserted))
}

/// Find an API key by the hash of a candidate token. Exact equality on the
/// stored hash; there is no prefix or substring matching.
pub async fn find_by_hash<C: ConnectionTrait>(db: &C, key_hash: &str) -> AppResult<Option<ApiKey>> {
    let result = crate::entity::api_key::Entity::find()
        .filter(crate::entity::api_key::Column::KeyHash.eq(key_hash))
        .one(db)
        .await?;

    Ok(result.map(model_to_api_key))
}

/// Delete the key(s) owned by a user. Returns the number of rows removed.
pub async fn delete_by_user<C: ConnectionTrait>(db: &C, user_id: i64) -> AppResult<u64> {
    let result = crate::entity::api_key::Entity::delete_many()
        .filter(crate::entity::api_key::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

fn model_to_api_key(m: crate::entity::api_key::Model) -> ApiKey {
    ApiKey {
        id: m.id,
        user_id: m.user_id,
        key_prefix: m.key_prefix,
        created_at: m.created_at,
    }
}
