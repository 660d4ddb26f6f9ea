use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, require_admin};
use crate::db::categories as category_db;
use crate::models::categories::{CreateCategory, UpdateCategory};

/// GET /api/categories — public catalog taxonomy.
pub async fn get_categories(db: web::Data<DatabaseConnection>) -> impl Responder {
    match category_db::get_all_categories(db.get_ref()).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch categories: {e}"),
        })),
    }
}

/// GET /api/categories/{id}
pub async fn get_category(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match category_db::get_category_by_id(db.get_ref(), id).await {
        Ok(Some(category)) => HttpResponse::Ok().json(category),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Category {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/categories — create a category (admin only).
pub async fn create_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateCategory>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    match category_db::insert_category(db.get_ref(), body.into_inner()).await {
        Ok(category) => HttpResponse::Created().json(category),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create category: {e}"),
        })),
    }
}

/// PUT /api/categories/{id} — update a category (admin only).
pub async fn update_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategory>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match category_db::update_category(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update category: {e}"),
            }))
        }
    }
}

/// DELETE /api/categories/{id} — delete a category (admin only).
pub async fn delete_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match category_db::delete_category(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Category {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Category {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete category: {e}"),
        })),
    }
}
