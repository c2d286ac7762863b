//! Message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message stored in the database.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub src_id: i64,
    pub dst_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Send request body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Recipient username.
    pub dst: String,
    pub content: String,
}

/// Acknowledgement that a message was persisted. No delivery tracking
/// beyond this.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendAck {
    pub dst: String,
    pub created_at: DateTime<Utc>,
}

/// One message of a conversation, endpoints relabeled from internal ids to
/// the two usernames involved in the call.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub src: String,
    pub dst: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
