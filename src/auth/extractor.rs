//! Actix-web extractor for bearer-token authentication.
//!
//! # Security
//! - The candidate token is wrapped in `SecretString` as soon as it leaves
//!   the header and is never logged
//! - Resolution is by exact SHA-256 hash equality; there is no substring
//!   or prefix matching
//! - Memory is zeroized when the request completes

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::AuthenticatedContext;
use crate::services::api_key;

/// The accepted scheme prefix, case-sensitive.
const BEARER_PREFIX: &str = "Bearer ";

/// Pull the candidate token out of the Authorization header.
///
/// An absent header, a non-UTF-8 value, or a scheme other than `Bearer`
/// all count as a missing credential. Whatever follows the prefix is
/// trimmed and forwarded as-is, even when empty; shape validation is the
/// resolver's problem.
fn bearer_token(req: &HttpRequest) -> Result<SecretString, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::MissingCredential)?;

    let value = header.to_str().map_err(|_| AppError::MissingCredential)?;

    let candidate = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AppError::MissingCredential)?;

    Ok(SecretString::from(candidate.trim().to_string()))
}

/// Extractor that requires a valid API key.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: ApiKeyAuth) -> impl Responder {
///     // auth.context is the resolved caller identity
/// }
/// ```
pub struct ApiKeyAuth {
    pub context: AuthenticatedContext,
}

impl FromRequest for ApiKeyAuth {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let candidate = bearer_token(req);

        Box::pin(async move {
            let pool = pool.ok_or_else(|| {
                AppError::Unavailable("database pool missing from app data".to_string())
            })?;
            let candidate = candidate?;

            let context = api_key::resolve(pool.connection(), candidate.expose_secret()).await?;
            Ok(ApiKeyAuth { context })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn token_for(header: &str) -> Result<String, AppError> {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        bearer_token(&req).map(|s| s.expose_secret().to_string())
    }

    #[test]
    fn test_missing_header() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            bearer_token(&req),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        assert!(matches!(
            token_for("Token cur_abc"),
            Err(AppError::MissingCredential)
        ));
        // The prefix is case-sensitive.
        assert!(matches!(
            token_for("bearer cur_abc"),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_strips_prefix_and_trims() {
        assert_eq!(token_for("Bearer cur_abc").unwrap(), "cur_abc");
        assert_eq!(token_for("Bearer   cur_abc  ").unwrap(), "cur_abc");
    }

    #[test]
    fn test_empty_candidate_is_forwarded() {
        assert_eq!(token_for("Bearer ").unwrap(), "");
    }
}
