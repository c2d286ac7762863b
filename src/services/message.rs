//! Messaging service: send and conversation retrieval.

use sea_orm::TransactionTrait;
use tracing::debug;

use crate::db::{self, DbPool};
use crate::error::{AppError, AppResult};
use crate::models::{AuthenticatedContext, ConversationMessage, Message, SendAck};

/// Send a message from the authenticated caller to `dst_username`.
///
/// Recipient resolution and the insert run in one transaction, so a
/// recipient deleted mid-request cannot slip between the existence check
/// and the write.
pub async fn send(
    pool: &DbPool,
    ctx: &AuthenticatedContext,
    dst_username: &str,
    content: &str,
) -> AppResult<SendAck> {
    let src_id = ctx.user_id;
    let dst_username = dst_username.to_string();
    let content = content.to_string();

    let (message, dst) = pool
        .connection()
        .transaction::<_, (Message, String), AppError>(move |txn| {
            Box::pin(async move {
                let dst = db::users::find_by_username(txn, &dst_username)
                    .await?
                    .ok_or_else(|| AppError::UnknownRecipient {
                        username: dst_username.clone(),
                    })?;

                if dst.id == src_id {
                    return Err(AppError::SelfMessage);
                }

                let message = db::messages::insert(txn, src_id, dst.id, &content).await?;
                Ok((message, dst.username))
            })
        })
        .await
        .map_err(AppError::from)?;

    debug!(src_id, dst_id = message.dst_id, "message persisted");

    Ok(SendAck {
        dst,
        created_at: message.created_at,
    })
}

/// Read the full bidirectional conversation between the caller and
/// `peer_username`, oldest first, with endpoints relabeled to the two
/// usernames involved. Internal ids never leave this function.
pub async fn read_conversation(
    pool: &DbPool,
    ctx: &AuthenticatedContext,
    peer_username: &str,
) -> AppResult<Vec<ConversationMessage>> {
    if peer_username == ctx.username {
        return Err(AppError::SelfConversation);
    }

    let peer = db::users::find_by_username(pool.connection(), peer_username)
        .await?
        .ok_or_else(|| AppError::UnknownPeer {
            username: peer_username.to_string(),
        })?;

    let messages = db::messages::conversation(pool.connection(), ctx.user_id, peer.id).await?;

    Ok(messages
        .into_iter()
        .map(|m| relabel(m, ctx, &peer.username))
        .collect())
}

/// Swap a message's numeric endpoints for the usernames of the two parties
/// of this call, preserving which of them sent it.
fn relabel(message: Message, ctx: &AuthenticatedContext, peer_username: &str) -> ConversationMessage {
    let (src, dst) = if message.src_id == ctx.user_id {
        (ctx.username.clone(), peer_username.to_string())
    } else {
        (peer_username.to_string(), ctx.username.clone())
    };

    ConversationMessage {
        src,
        dst,
        content: message.content,
        created_at: message.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ctx() -> AuthenticatedContext {
        AuthenticatedContext {
            user_id: 1,
            username: "alice".to_string(),
        }
    }

    fn message(src_id: i64, dst_id: i64) -> Message {
        Message {
            id: 1,
            src_id,
            dst_id,
            content: "hi".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_relabel_outgoing() {
        let labeled = relabel(message(1, 2), &ctx(), "bob");
        assert_eq!(labeled.src, "alice");
        assert_eq!(labeled.dst, "bob");
    }

    #[test]
    fn test_relabel_incoming() {
        let labeled = relabel(message(2, 1), &ctx(), "bob");
        assert_eq!(labeled.src, "bob");
        assert_eq!(labeled.dst, "alice");
    }
}
