use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, require_admin};
use crate::db::artisans as artisan_db;
use crate::db::orders as order_db;
use crate::db::products as product_db;
use crate::db::users as user_db;
use crate::models::artisans::{ArtisanStatus, BulkStatusRequest};
use crate::models::users::Role;
use crate::onboarding::SubmittedDocuments;

/// GET /api/admin/stats — top-level platform counters.
pub async fn get_stats(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let artisans = artisan_db::count_artisans(db.get_ref()).await;
    let clients = user_db::count_by_role(db.get_ref(), Role::Client).await;
    let products = product_db::count_products(db.get_ref()).await;
    let orders = order_db::count_orders(db.get_ref()).await;

    match (artisans, clients, products, orders) {
        (Ok(artisans), Ok(clients), Ok(products), Ok(orders)) => {
            HttpResponse::Ok().json(serde_json::json!({
                "artisans": artisans,
                "clients": clients,
                "products": products,
                "orders": orders,
            }))
        }
        _ => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to compute stats",
        })),
    }
}

/// POST /api/admin/artisans/bulk-validate — flip statut only; none of the
/// single-record validation side effects (QR, email) run here.
pub async fn bulk_validate(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<BulkStatusRequest>,
) -> impl Responder {
    bulk_set_status(user, db, body, ArtisanStatus::Valide).await
}

/// POST /api/admin/artisans/bulk-suspend — flip statut only.
pub async fn bulk_suspend(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<BulkStatusRequest>,
) -> impl Responder {
    bulk_set_status(user, db, body, ArtisanStatus::Suspendu).await
}

async fn bulk_set_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<BulkStatusRequest>,
    statut: ArtisanStatus,
) -> HttpResponse {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    match artisan_db::set_status_bulk(db.get_ref(), &body.ids, statut).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "updated": updated,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update artisans: {e}"),
        })),
    }
}

/// GET /api/admin/artisans/{id}/documents — per-slot presence summary of
/// the five onboarding documents.
pub async fn get_documents(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    let profile = match artisan_db::get_artisan_by_id(db.get_ref(), id).await {
        Ok(Some((profile, _))) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Artisan {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let documents = SubmittedDocuments::from_profile(&profile);
    let missing = documents.missing();

    HttpResponse::Ok().json(serde_json::json!({
        "documents": documents,
        "missing": missing,
        "completed": 5 - missing.len(),
        "total": 5,
    }))
}
