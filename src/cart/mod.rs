//! Dual-mode shopping cart.
//!
//! One contract ([`CartBackend`]) with two implementations: the persisted
//! per-user cart and the anonymous session cart. Both produce the same
//! response shape, so a calling client cannot tell the backing store apart.
//!
//! Stock is consulted, never reserved: two concurrent adds can both pass the
//! check and together exceed stock. This matches the observed behavior of
//! the system and is deliberately left without locking.

pub mod persistent;
pub mod session;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use persistent::PersistentCart;
pub use session::{SessionCart, SessionStore};

use crate::models::products::{self, ProductStatus};

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Quantity must be a positive integer.")]
    InvalidQuantity,
    #[error("Product not found or inactive.")]
    ProductNotFound,
    #[error("Item not found.")]
    ItemNotFound,
    #[error("Insufficient stock.")]
    InsufficientStock,
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Session store error: {0}")]
    Session(String),
}

/// One cart line as returned to clients: the stored quantity plus a full
/// product snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: Uuid,
    pub product: products::Model,
    pub quantity: i32,
}

/// The storage-level shape of a line, shared by both backends. This is also
/// the exact serialization format of the anonymous session cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Product lookup capability. The engine only ever needs single-product
/// reads, so tests can substitute an in-memory map for the database.
#[async_trait]
pub trait ProductSource: Sync {
    async fn product(&self, id: Uuid) -> Result<Option<products::Model>, CartError>;
}

#[async_trait]
impl ProductSource for DatabaseConnection {
    async fn product(&self, id: Uuid) -> Result<Option<products::Model>, CartError> {
        products::Entity::find_by_id(id)
            .one(self)
            .await
            .map_err(CartError::from)
    }
}

/// The four cart operations, identical across both backends.
#[async_trait]
pub trait CartBackend {
    async fn list(&self, products: &dyn ProductSource) -> Result<Vec<CartLine>, CartError>;
    async fn add(
        &self,
        products: &dyn ProductSource,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError>;
    async fn update_item(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError>;
    async fn remove(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
    ) -> Result<Vec<CartLine>, CartError>;
}

pub fn check_quantity(quantity: i32) -> Result<(), CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }
    Ok(())
}

/// The single stock check both backends go through: the candidate total for
/// a product must not exceed its live stock.
pub fn ensure_stock(product: &products::Model, requested_total: i32) -> Result<(), CartError> {
    if product.stock < requested_total {
        return Err(CartError::InsufficientStock);
    }
    Ok(())
}

/// Look up a product that must exist and be active (add/update path).
pub async fn active_product(
    products: &dyn ProductSource,
    id: Uuid,
) -> Result<products::Model, CartError> {
    match products.product(id).await? {
        Some(p) if p.status == ProductStatus::Active => Ok(p),
        _ => Err(CartError::ProductNotFound),
    }
}

/// Denormalize stored lines into response lines. A product deleted after
/// being added surfaces as an error for that item, never a silent drop.
pub async fn build_lines(
    products: &dyn ProductSource,
    stored: &[StoredLine],
) -> Result<Vec<CartLine>, CartError> {
    let mut lines = Vec::with_capacity(stored.len());
    for line in stored {
        let product = products
            .product(line.product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;
        lines.push(CartLine {
            id: line.id,
            product,
            quantity: line.quantity,
        });
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(stock: i32) -> products::Model {
        products::Model {
            id: Uuid::new_v4(),
            name: "Collier en perles".to_string(),
            description: "Perles en terre cuite".to_string(),
            category_id: Uuid::new_v4(),
            artisan_id: None,
            price: Decimal::new(2500, 2),
            stock,
            image: None,
            status: ProductStatus::Active,
            variants: serde_json::json!([]),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(matches!(check_quantity(0), Err(CartError::InvalidQuantity)));
        assert!(matches!(
            check_quantity(-3),
            Err(CartError::InvalidQuantity)
        ));
        assert!(check_quantity(1).is_ok());
    }

    #[test]
    fn test_stock_boundary() {
        let p = product(5);
        assert!(ensure_stock(&p, 5).is_ok());
        assert!(matches!(
            ensure_stock(&p, 6),
            Err(CartError::InsufficientStock)
        ));
    }
}
