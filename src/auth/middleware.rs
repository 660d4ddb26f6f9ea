use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, HttpResponse, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users as user_db;
use crate::models::users::{self, Role};

/// Extractor for endpoints that require a logged-in user.
pub struct AuthenticatedUser(pub users::Model);

/// Extractor for dual-mode endpoints (cart, reviews): `None` when no
/// Authorization header is present, 401 when one is present but invalid.
pub struct MaybeUser(pub Option<users::Model>);

async fn user_from_request(req: &HttpRequest) -> Result<users::Model, Error> {
    // 1. Extract the Bearer token from the Authorization header.
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Missing Authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;

    // 2. Validate the JWT.
    let claims = jwt::validate_access_token(token)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;

    // 3. Load the user row behind the token.
    let db = req
        .app_data::<web::Data<DatabaseConnection>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Database not configured"))?;

    let user = user_db::get_user_by_id(db.get_ref(), user_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown user"))?;

    Ok(user)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { user_from_request(&req).await.map(AuthenticatedUser) })
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if req.headers().get("Authorization").is_none() {
                return Ok(MaybeUser(None));
            }
            user_from_request(&req).await.map(|u| MaybeUser(Some(u)))
        })
    }
}

/// Role gate for admin-only endpoints; exhaustive over the closed role set.
pub fn require_admin(user: &users::Model) -> Result<(), HttpResponse> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Artisan | Role::Client => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Admin role required",
        }))),
    }
}
