use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::carts as cart_db;
use crate::db::orders as order_db;
use crate::db::products as product_db;

/// GET /api/orders — the caller's orders, newest first.
pub async fn get_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match order_db::get_orders_by_user(db.get_ref(), user.0.id).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch orders: {e}"),
        })),
    }
}

/// GET /api/orders/{id} — one of the caller's orders.
pub async fn get_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match order_db::get_order_for_user(db.get_ref(), id, user.0.id).await {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Order {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/orders — snapshot the caller's persistent cart into an order
/// at current prices, then clear the cart. Stock is not decremented.
pub async fn create_order(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let cart = match cart_db::get_or_create_cart(db.get_ref(), user.0.id).await {
        Ok(cart) => cart,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let items = match cart_db::get_items(db.get_ref(), cart.id).await {
        Ok(items) => items,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if items.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Cart is empty",
        }));
    }

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        match product_db::get_product_by_id(db.get_ref(), item.product_id).await {
            Ok(Some(product)) => lines.push((product, item.quantity)),
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Product {} no longer exists", item.product_id),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    match order_db::create_order_from_cart(db.get_ref(), user.0.id, cart.id, lines).await {
        Ok(order) => HttpResponse::Created().json(order),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create order: {e}"),
        })),
    }
}
