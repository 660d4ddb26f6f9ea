use sea_orm::*;
use uuid::Uuid;

use crate::models::{cart_items, carts};

/// Fetch the user's cart, creating it lazily on first access.
pub async fn get_or_create_cart(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<carts::Model, DbErr> {
    if let Some(cart) = carts::Entity::find()
        .filter(carts::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(cart);
    }

    let new_cart = carts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_cart.insert(db).await
}

pub async fn get_items(
    db: &DatabaseConnection,
    cart_id: Uuid,
) -> Result<Vec<cart_items::Model>, DbErr> {
    cart_items::Entity::find()
        .filter(cart_items::Column::CartId.eq(cart_id))
        .all(db)
        .await
}

/// Fetch an item by id, scoped to the given cart so callers can never touch
/// another actor's lines.
pub async fn find_item(
    db: &DatabaseConnection,
    cart_id: Uuid,
    item_id: Uuid,
) -> Result<Option<cart_items::Model>, DbErr> {
    cart_items::Entity::find_by_id(item_id)
        .filter(cart_items::Column::CartId.eq(cart_id))
        .one(db)
        .await
}

pub async fn find_item_by_product(
    db: &DatabaseConnection,
    cart_id: Uuid,
    product_id: Uuid,
) -> Result<Option<cart_items::Model>, DbErr> {
    cart_items::Entity::find()
        .filter(cart_items::Column::CartId.eq(cart_id))
        .filter(cart_items::Column::ProductId.eq(product_id))
        .one(db)
        .await
}

pub async fn insert_item(
    db: &DatabaseConnection,
    cart_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> Result<cart_items::Model, DbErr> {
    let new_item = cart_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        cart_id: Set(cart_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
    };

    new_item.insert(db).await
}

pub async fn set_item_quantity(
    db: &DatabaseConnection,
    item: cart_items::Model,
    quantity: i32,
) -> Result<cart_items::Model, DbErr> {
    let mut active: cart_items::ActiveModel = item.into();
    active.quantity = Set(quantity);
    active.update(db).await
}

pub async fn delete_item(
    db: &DatabaseConnection,
    item: cart_items::Model,
) -> Result<DeleteResult, DbErr> {
    item.delete(db).await
}
