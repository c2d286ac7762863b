//! User API endpoints: registration, lookup, deletion.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, RegisterRequest, UserResponse};
use crate::services;

/// Path ids come in as raw strings so a non-numeric id surfaces as our own
/// client fault instead of the framework's default 404.
fn parse_user_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>().map_err(|_| AppError::InvalidInput {
        field: "id",
        message: format!("{raw} is not a valid user id"),
    })
}

/// Register a new user and issue its API key.
///
/// The returned token is shown exactly once; only its hash is stored.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created, token issued", body = crate::models::RegisterResponse),
        (status = 409, description = "Username or email already taken")
    )
)]
#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let response = services::user::register(pool.get_ref(), &body.username, &body.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Get the authenticated caller's own user record.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Caller's user record", body = UserResponse),
        (status = 401, description = "Missing or invalid credential")
    )
)]
#[get("/me")]
pub async fn me(pool: web::Data<DbPool>, auth: ApiKeyAuth) -> AppResult<HttpResponse> {
    let user = services::user::get_by_id(pool.get_ref(), auth.context.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Get a user by numeric id.
#[utoipa::path(
    get,
    path = "/user_by_id/{id}",
    tag = "Users",
    security(("bearer_token" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No such user")
    )
)]
#[get("/user_by_id/{id}")]
pub async fn user_by_id(
    pool: web::Data<DbPool>,
    _auth: ApiKeyAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    let user = services::user::get_by_id(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Get a user by username.
#[utoipa::path(
    get,
    path = "/user_by_username/{username}",
    tag = "Users",
    security(("bearer_token" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 404, description = "No such user")
    )
)]
#[get("/user_by_username/{username}")]
pub async fn user_by_username(
    pool: web::Data<DbPool>,
    _auth: ApiKeyAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let user = services::user::get_by_username(pool.get_ref(), &username)
        .await?
        .ok_or(AppError::NotFound {
            entity: "user",
            key: username,
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Hard-delete a user and its API key; returns the deleted snapshot.
#[utoipa::path(
    delete,
    path = "/delete_user_by_id/{id}",
    tag = "Users",
    security(("bearer_token" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user snapshot", body = UserResponse),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No such user")
    )
)]
#[delete("/delete_user_by_id/{id}")]
pub async fn delete_user_by_id(
    pool: web::Data<DbPool>,
    _auth: ApiKeyAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    let user = services::user::delete_by_id(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(me)
        .service(user_by_id)
        .service(user_by_username)
        .service(delete_user_by_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(matches!(
            parse_user_id("forty-two"),
            Err(AppError::InvalidInput { field: "id", .. })
        ));
        assert!(parse_user_id("").is_err());
    }
}
