use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, require_admin};
use crate::db::tutorials as tutorial_db;
use crate::models::training_fields::{CreateTrainingField, UpdateTrainingField};
use crate::models::tutorial_categories::{
    CreateTutorialCategory, TutorialCategoryQuery, UpdateTutorialCategory,
};
use crate::models::tutorials::{CreateTutorial, TutorialListQuery, UpdateTutorial};

// ── training fields ──

/// GET /api/training-fields
pub async fn get_fields(db: web::Data<DatabaseConnection>) -> impl Responder {
    match tutorial_db::get_all_fields(db.get_ref()).await {
        Ok(fields) => HttpResponse::Ok().json(fields),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch training fields: {e}"),
        })),
    }
}

/// POST /api/training-fields (admin only)
pub async fn create_field(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateTrainingField>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    match tutorial_db::insert_field(db.get_ref(), body.into_inner()).await {
        Ok(field) => HttpResponse::Created().json(field),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create training field: {e}"),
        })),
    }
}

/// GET /api/training-fields/{id}
pub async fn get_field(db: web::Data<DatabaseConnection>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    match tutorial_db::get_field_by_id(db.get_ref(), id).await {
        Ok(Some(field)) => HttpResponse::Ok().json(field),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Training field {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/training-fields/{id} (admin only)
pub async fn update_field(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTrainingField>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::update_field(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update training field: {e}"),
            }))
        }
    }
}

/// DELETE /api/training-fields/{id} (admin only)
pub async fn delete_field(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::delete_field(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Training field {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Training field {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete training field: {e}"),
        })),
    }
}

// ── tutorial categories ──

/// GET /api/tutorial-categories?field=
pub async fn get_categories(
    db: web::Data<DatabaseConnection>,
    query: web::Query<TutorialCategoryQuery>,
) -> impl Responder {
    match tutorial_db::get_categories(db.get_ref(), &query).await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch tutorial categories: {e}"),
        })),
    }
}

/// POST /api/tutorial-categories (admin only)
pub async fn create_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateTutorialCategory>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    match tutorial_db::insert_category(db.get_ref(), body.into_inner()).await {
        Ok(category) => HttpResponse::Created().json(category),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create tutorial category: {e}"),
        })),
    }
}

/// GET /api/tutorial-categories/{id}
pub async fn get_category(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match tutorial_db::get_category_by_id(db.get_ref(), id).await {
        Ok(Some(category)) => HttpResponse::Ok().json(category),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Tutorial category {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/tutorial-categories/{id} (admin only)
pub async fn update_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTutorialCategory>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::update_category(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update tutorial category: {e}"),
            }))
        }
    }
}

/// DELETE /api/tutorial-categories/{id} (admin only)
pub async fn delete_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::delete_category(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Tutorial category {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Tutorial category {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete tutorial category: {e}"),
        })),
    }
}

// ── tutorials ──

/// GET /api/tutorials — field/category/format/level/status filters.
pub async fn get_tutorials(
    db: web::Data<DatabaseConnection>,
    query: web::Query<TutorialListQuery>,
) -> impl Responder {
    match tutorial_db::get_tutorials_filtered(db.get_ref(), &query).await {
        Ok(tutorials) => HttpResponse::Ok().json(tutorials),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch tutorials: {e}"),
        })),
    }
}

/// POST /api/tutorials (admin only)
pub async fn create_tutorial(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateTutorial>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    match tutorial_db::insert_tutorial(db.get_ref(), body.into_inner(), Some(user.0.id)).await {
        Ok(tutorial) => HttpResponse::Created().json(tutorial),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create tutorial: {e}"),
        })),
    }
}

/// GET /api/tutorials/{id}
pub async fn get_tutorial(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match tutorial_db::get_tutorial_by_id(db.get_ref(), id).await {
        Ok(Some(tutorial)) => HttpResponse::Ok().json(tutorial),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Tutorial {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/tutorials/{id} (admin only)
pub async fn update_tutorial(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTutorial>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::update_tutorial(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update tutorial: {e}"),
            }))
        }
    }
}

/// DELETE /api/tutorials/{id} (admin only)
pub async fn delete_tutorial(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    match tutorial_db::delete_tutorial(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Tutorial {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Tutorial {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete tutorial: {e}"),
        })),
    }
}
