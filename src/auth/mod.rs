//! API-key authentication gateway.

mod extractor;

pub use extractor::ApiKeyAuth;
