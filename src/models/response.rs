//! Success envelope shared by every endpoint.

use serde::Serialize;

/// `{status: "success", data: ...}` wrapper. The failure envelopes are
/// produced by the error normalizer, never by handlers.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}
