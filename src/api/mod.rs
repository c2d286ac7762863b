//! API endpoint modules.

pub mod health;
pub mod messages;
pub mod openapi;
pub mod users;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

use actix_web::web;

/// Configure every route of the service. Shared by main and the test
/// harness so both always serve the same surface.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    users::configure_routes(cfg);
    messages::configure_routes(cfg);
    health::configure_health_routes(cfg);
}
