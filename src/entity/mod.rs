//! SeaORM entities.

pub mod api_key;
pub mod message;
pub mod user;
