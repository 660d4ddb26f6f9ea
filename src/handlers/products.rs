use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, MaybeUser, require_admin};
use crate::db::products as product_db;
use crate::models::products::{CreateProduct, ProductListQuery, UpdateProduct};
use crate::models::users::Role;

/// GET /api/products — public catalog. Staff and admin callers may see
/// inactive products (and filter on status); everyone else only gets active
/// ones.
pub async fn get_products(
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProductListQuery>,
) -> impl Responder {
    let include_inactive = user
        .0
        .map(|u| u.is_staff || u.role == Role::Admin)
        .unwrap_or(false);

    match product_db::get_products_filtered(db.get_ref(), &query, include_inactive).await {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch products: {e}"),
        })),
    }
}

/// GET /api/products/{id}
pub async fn get_product(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match product_db::get_product_by_id(db.get_ref(), id).await {
        Ok(Some(product)) => HttpResponse::Ok().json(product),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Product {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/products/{id}/related — up to 8 products in the same category.
pub async fn get_related(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let product = match product_db::get_product_by_id(db.get_ref(), id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Product {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match product_db::get_related_products(db.get_ref(), &product).await {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/products/{id}/artisan-products — up to 8 products by the same
/// artisan; empty list when the product has none.
pub async fn get_artisan_products(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let product = match product_db::get_product_by_id(db.get_ref(), id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Product {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match product_db::get_artisan_products(db.get_ref(), &product).await {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/products — create a product (admin only).
pub async fn create_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProduct>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    if let Err(msg) = body.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }));
    }

    match product_db::insert_product(db.get_ref(), body.into_inner()).await {
        Ok(product) => HttpResponse::Created().json(product),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create product: {e}"),
        })),
    }
}

/// PUT /api/products/{id} — update a product (admin only).
pub async fn update_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProduct>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    if let Err(msg) = body.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }));
    }

    let id = path.into_inner();
    match product_db::update_product(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update product: {e}"),
            }))
        }
    }
}

/// DELETE /api/products/{id} — delete a product (admin only).
pub async fn delete_product(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match product_db::delete_product(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Product {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Product {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete product: {e}"),
        })),
    }
}
