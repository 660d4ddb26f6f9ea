use sea_orm::*;
use uuid::Uuid;

use crate::models::orders::OrderResponse;
use crate::models::{order_items, orders, products};

/// Snapshot the given cart lines into a new order, then clear the cart.
/// Item prices are frozen at the current product price; later price edits
/// never touch an existing order.
pub async fn create_order_from_cart(
    db: &DatabaseConnection,
    user_id: Uuid,
    cart_id: Uuid,
    lines: Vec<(products::Model, i32)>,
) -> Result<OrderResponse, DbErr> {
    let txn = db.begin().await?;

    let order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (product, quantity) in lines {
        let item = order_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product.id),
            quantity: Set(quantity),
            price: Set(product.price),
        }
        .insert(&txn)
        .await?;
        items.push(item);
    }

    crate::models::cart_items::Entity::delete_many()
        .filter(crate::models::cart_items::Column::CartId.eq(cart_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(OrderResponse {
        id: order.id,
        user_id: order.user_id,
        created_at: order.created_at,
        items,
    })
}

/// All orders of one user, newest first, with their item lines.
pub async fn get_orders_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<OrderResponse>, DbErr> {
    let rows = orders::Entity::find()
        .filter(orders::Column::UserId.eq(user_id))
        .order_by_desc(orders::Column::CreatedAt)
        .find_with_related(order_items::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(order, items)| OrderResponse {
            id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
            items,
        })
        .collect())
}

pub async fn get_order_for_user(
    db: &DatabaseConnection,
    order_id: Uuid,
    user_id: Uuid,
) -> Result<Option<OrderResponse>, DbErr> {
    let Some(order) = orders::Entity::find_by_id(order_id)
        .filter(orders::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let items = order_items::Entity::find()
        .filter(order_items::Column::OrderId.eq(order.id))
        .all(db)
        .await?;

    Ok(Some(OrderResponse {
        id: order.id,
        user_id: order.user_id,
        created_at: order.created_at,
        items,
    }))
}

pub async fn count_orders(db: &DatabaseConnection) -> Result<u64, DbErr> {
    orders::Entity::find().count(db).await
}
