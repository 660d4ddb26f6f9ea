use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    CartBackend, CartError, CartLine, ProductSource, StoredLine, active_product, build_lines,
    check_quantity, ensure_stock,
};
use crate::db::carts as cart_db;

/// Cart backend for authenticated users: one `carts` row per user (created
/// lazily) plus `cart_items` rows, unique per (cart, product).
pub struct PersistentCart {
    db: Arc<DatabaseConnection>,
    user_id: Uuid,
}

impl PersistentCart {
    pub fn new(db: Arc<DatabaseConnection>, user_id: Uuid) -> Self {
        Self { db, user_id }
    }

    async fn stored_lines(&self, cart_id: Uuid) -> Result<Vec<StoredLine>, CartError> {
        let items = cart_db::get_items(&self.db, cart_id).await?;
        Ok(items
            .into_iter()
            .map(|i| StoredLine {
                id: i.id,
                product_id: i.product_id,
                quantity: i.quantity,
            })
            .collect())
    }
}

#[async_trait]
impl CartBackend for PersistentCart {
    async fn list(&self, products: &dyn ProductSource) -> Result<Vec<CartLine>, CartError> {
        let cart = cart_db::get_or_create_cart(&self.db, self.user_id).await?;
        let stored = self.stored_lines(cart.id).await?;
        build_lines(products, &stored).await
    }

    async fn add(
        &self,
        products: &dyn ProductSource,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        check_quantity(quantity)?;
        let cart = cart_db::get_or_create_cart(&self.db, self.user_id).await?;
        let product = active_product(products, product_id).await?;

        match cart_db::find_item_by_product(&self.db, cart.id, product_id).await? {
            Some(existing) => {
                ensure_stock(&product, existing.quantity + quantity)?;
                cart_db::set_item_quantity(&self.db, existing.clone(), existing.quantity + quantity)
                    .await?;
            }
            None => {
                ensure_stock(&product, quantity)?;
                cart_db::insert_item(&self.db, cart.id, product_id, quantity).await?;
            }
        }

        let stored = self.stored_lines(cart.id).await?;
        build_lines(products, &stored).await
    }

    async fn update_item(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        check_quantity(quantity)?;
        let cart = cart_db::get_or_create_cart(&self.db, self.user_id).await?;

        let item = cart_db::find_item(&self.db, cart.id, item_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        let product = active_product(products, item.product_id).await?;
        ensure_stock(&product, quantity)?;
        cart_db::set_item_quantity(&self.db, item, quantity).await?;

        let stored = self.stored_lines(cart.id).await?;
        build_lines(products, &stored).await
    }

    async fn remove(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
    ) -> Result<Vec<CartLine>, CartError> {
        let cart = cart_db::get_or_create_cart(&self.db, self.user_id).await?;

        let item = cart_db::find_item(&self.db, cart.id, item_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;
        cart_db::delete_item(&self.db, item).await?;

        let stored = self.stored_lines(cart.id).await?;
        build_lines(products, &stored).await
    }
}
