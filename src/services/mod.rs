//! Service layer: validation and orchestration between the HTTP boundary
//! and the store.

pub mod api_key;
pub mod message;
pub mod user;
