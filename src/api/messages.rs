//! Messaging API endpoints.

use actix_web::{HttpResponse, get, post, web};

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{ApiResponse, SendMessageRequest};
use crate::services;

/// Send a direct message to another user.
#[utoipa::path(
    post,
    path = "/send_message",
    tag = "Messages",
    security(("bearer_token" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Message persisted", body = crate::models::SendAck),
        (status = 400, description = "Recipient is the caller"),
        (status = 404, description = "Recipient does not exist")
    )
)]
#[post("/send_message")]
pub async fn send_message(
    pool: web::Data<DbPool>,
    auth: ApiKeyAuth,
    body: web::Json<SendMessageRequest>,
) -> AppResult<HttpResponse> {
    let ack = services::message::send(pool.get_ref(), &auth.context, &body.dst, &body.content).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ack)))
}

/// Read the full conversation with another user, oldest message first.
/// Endpoints come back as usernames; internal ids are never exposed.
#[utoipa::path(
    get,
    path = "/read_message/{peer_username}",
    tag = "Messages",
    security(("bearer_token" = [])),
    params(("peer_username" = String, Path, description = "Conversation peer username")),
    responses(
        (status = 200, description = "Ordered conversation", body = [crate::models::ConversationMessage]),
        (status = 400, description = "Peer is the caller"),
        (status = 404, description = "Peer does not exist")
    )
)]
#[get("/read_message/{peer_username}")]
pub async fn read_message(
    pool: web::Data<DbPool>,
    auth: ApiKeyAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let peer_username = path.into_inner();
    let messages =
        services::message::read_conversation(pool.get_ref(), &auth.context, &peer_username).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(messages)))
}

/// Configure messaging routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(send_message).service(read_message);
}
