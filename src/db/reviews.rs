use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview, ReviewListQuery};

pub async fn insert_review(
    db: &DatabaseConnection,
    input: CreateReview,
    user_id: Option<Uuid>,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(input.product_id),
        user_id: Set(user_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

pub async fn get_reviews(
    db: &DatabaseConnection,
    query: &ReviewListQuery,
) -> Result<Vec<reviews::Model>, DbErr> {
    let mut find = reviews::Entity::find();

    if let Some(product) = query.product {
        find = find.filter(reviews::Column::ProductId.eq(product));
    }

    find.order_by_desc(reviews::Column::CreatedAt).all(db).await
}

/// Reviews across every product owned by one artisan.
pub async fn get_reviews_for_products(
    db: &DatabaseConnection,
    product_ids: Vec<Uuid>,
) -> Result<Vec<reviews::Model>, DbErr> {
    if product_ids.is_empty() {
        return Ok(Vec::new());
    }

    reviews::Entity::find()
        .filter(reviews::Column::ProductId.is_in(product_ids))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
