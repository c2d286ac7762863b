//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courier Server",
        version = "0.3.0",
        description = "Direct-messaging API with per-user API-key authentication"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // User endpoints
        api::users::register,
        api::users::me,
        api::users::user_by_id,
        api::users::user_by_username,
        api::users::delete_user_by_id,
        // Messaging endpoints
        api::messages::send_message,
        api::messages::read_message,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Users
            models::RegisterRequest,
            models::RegisterResponse,
            models::UserResponse,
            // Messages
            models::SendMessageRequest,
            models::SendAck,
            models::ConversationMessage,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Registration, lookup, deletion"),
        (name = "Messages", description = "Direct messaging between users")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the bearer-token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}
