use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::MaybeUser;
use crate::db::products as product_db;
use crate::db::reviews as review_db;
use crate::models::reviews::{CreateReview, ReviewListQuery};

/// GET /api/reviews — list reviews, optionally filtered by `?product=`.
pub async fn get_reviews(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ReviewListQuery>,
) -> impl Responder {
    match review_db::get_reviews(db.get_ref(), &query).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch reviews: {e}"),
        })),
    }
}

/// POST /api/reviews — anonymous reviews are allowed; a valid JWT attaches
/// the author.
pub async fn create_review(
    user: MaybeUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateReview>,
) -> impl Responder {
    let input = body.into_inner();

    if !(1..=5).contains(&input.rating) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Rating must be between 1 and 5",
        }));
    }

    match product_db::get_product_by_id(db.get_ref(), input.product_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Product {} not found", input.product_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    let user_id = user.0.map(|u| u.id);
    match review_db::insert_review(db.get_ref(), input, user_id).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create review: {e}"),
        })),
    }
}

/// GET /api/reviews/by-artisan/{artisan_id} — reviews across every product
/// of one artisan.
pub async fn get_reviews_by_artisan(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let artisan_id = path.into_inner();

    let product_ids = match product_db::get_product_ids_by_artisan(db.get_ref(), artisan_id).await
    {
        Ok(ids) => ids,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match review_db::get_reviews_for_products(db.get_ref(), product_ids).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch reviews: {e}"),
        })),
    }
}
