//! Request logging middleware for detailed API request/response logging.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{info, warn};

/// How many characters of a bearer token are safe to log.
const TOKEN_LOG_CHARS: usize = 8;

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let remote_addr = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        // Only the token prefix is ever logged.
        let credential_info = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| match v.strip_prefix("Bearer ") {
                Some(token) => {
                    let token = token.trim();
                    if token.chars().count() >= TOKEN_LOG_CHARS {
                        format!("{}...", token.chars().take(TOKEN_LOG_CHARS).collect::<String>())
                    } else {
                        "invalid".to_string()
                    }
                }
                None => "malformed".to_string(),
            })
            .unwrap_or_else(|| "none".to_string());

        info!(
            target: "api",
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            credential = %credential_info,
            "→ Request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let elapsed = start.elapsed();
            let status = res.status();
            let status_code = status.as_u16();

            if status.is_success() {
                info!(
                    target: "api",
                    method = %method,
                    path = %path,
                    status = %status_code,
                    duration_ms = %elapsed.as_millis(),
                    "← Request completed"
                );
            } else if status.is_client_error() {
                warn!(
                    target: "api",
                    method = %method,
                    path = %path,
                    status = %status_code,
                    duration_ms = %elapsed.as_millis(),
                    "← Client error"
                );
            } else {
                warn!(
                    target: "api",
                    method = %method,
                    path = %path,
                    status = %status_code,
                    duration_ms = %elapsed.as_millis(),
                    "← Server error"
                );
            }

            Ok(res)
        })
    }
}
