//! Database operations for messages.

use chrono::Utc;
use sea_orm::*;

use crate::error::AppResult;
use crate::models::Message;

/// Persist a message. Endpoint existence is the service layer's job; this
/// only writes the row.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    src_id: i64,
    dst_id: i64,
    content: &str,
) -> AppResult<Message> {
    let model = crate::entity::message::ActiveModel {
        src_id: Set(src_id),
        dst_id: Set(dst_id),
        content: Set(content.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    Ok(model_to_message(inserted))
}

/// Fetch the full bidirectional conversation between two users, ordered by
/// creation time ascending, ties broken by insertion order.
pub async fn conversation<C: ConnectionTrait>(
    db: &C,
    user_a: i64,
    user_b: i64,
) -> AppResult<Vec<Message>> {
    use crate::entity::message::Column;

    let results = crate::entity::message::Entity::find()
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(Column::SrcId.eq(user_a))
                        .add(Column::DstId.eq(user_b)),
                )
                .add(
                    Condition::all()
                        .add(Column::SrcId.eq(user_b))
                        .add(Column::DstId.eq(user_a)),
                ),
        )
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(db)
        .await?;

    Ok(results.into_iter().map(model_to_message).collect())
}

fn model_to_message(m: crate::entity::message::Model) -> Message {
    Message {
        id: m.id,
        src_id: m.src_id,
        dst_id: m.dst_id,
        content: m.content,
        created_at: m.created_at,
    }
}
