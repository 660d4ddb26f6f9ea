use actix_web::{HttpRequest, HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::MaybeUser;
use crate::cache::RedisCache;
use crate::cart::{CartBackend, CartError, CartLine, PersistentCart, SessionCart, SessionStore};
use crate::models::carts::{AddCartItem, UpdateCartItem};

/// Pick the backend for this request: JWT wins, otherwise the opaque
/// `X-Session-Id` header selects an anonymous session cart.
fn resolve_backend(
    user: MaybeUser,
    req: &HttpRequest,
    db: &web::Data<DatabaseConnection>,
    cache: &web::Data<RedisCache>,
) -> Result<Box<dyn CartBackend>, HttpResponse> {
    if let Some(user) = user.0 {
        return Ok(Box::new(PersistentCart::new(
            db.clone().into_inner(),
            user.id,
        )));
    }

    let session_id = req
        .headers()
        .get("X-Session-Id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty());

    match session_id {
        Some(session_id) => {
            let store: Arc<dyn SessionStore> = Arc::new(cache.get_ref().clone());
            Ok(Box::new(SessionCart::new(store, session_id)))
        }
        None => Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Missing X-Session-Id header for anonymous cart",
        }))),
    }
}

fn cart_response(result: Result<Vec<CartLine>, CartError>) -> HttpResponse {
    match result {
        Ok(items) => HttpResponse::Ok().json(serde_json::json!({ "items": items })),
        Err(e @ (CartError::ProductNotFound | CartError::ItemNotFound)) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e @ (CartError::InvalidQuantity | CartError::InsufficientStock)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// GET /api/cart
pub async fn get_cart(
    user: MaybeUser,
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<RedisCache>,
) -> impl Responder {
    let backend = match resolve_backend(user, &req, &db, &cache) {
        Ok(backend) => backend,
        Err(response) => return response,
    };

    cart_response(backend.list(db.get_ref()).await)
}

/// POST /api/cart — add a product (quantity defaults to 1).
pub async fn add_to_cart(
    user: MaybeUser,
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<RedisCache>,
    body: web::Json<AddCartItem>,
) -> impl Responder {
    let backend = match resolve_backend(user, &req, &db, &cache) {
        Ok(backend) => backend,
        Err(response) => return response,
    };

    cart_response(
        backend
            .add(db.get_ref(), body.product_id, body.quantity)
            .await,
    )
}

/// PUT /api/cart/{item_id} — replace a line's quantity.
pub async fn update_cart_item(
    user: MaybeUser,
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<RedisCache>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCartItem>,
) -> impl Responder {
    let backend = match resolve_backend(user, &req, &db, &cache) {
        Ok(backend) => backend,
        Err(response) => return response,
    };

    cart_response(
        backend
            .update_item(db.get_ref(), path.into_inner(), body.quantity)
            .await,
    )
}

/// DELETE /api/cart/{item_id}
pub async fn remove_cart_item(
    user: MaybeUser,
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<RedisCache>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let backend = match resolve_backend(user, &req, &db, &cache) {
        Ok(backend) => backend,
        Err(response) => return response,
    };

    cart_response(backend.remove(db.get_ref(), path.into_inner()).await)
}
