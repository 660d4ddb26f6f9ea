use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::{
    CartBackend, CartError, CartLine, ProductSource, StoredLine, active_product, build_lines,
    check_quantity, ensure_stock,
};
use crate::cache::{RedisCache, keys};

/// Opaque per-caller storage for anonymous carts. The engine holds no
/// process-wide state: whatever implements this owns the persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Vec<StoredLine>, CartError>;
    async fn store(&self, key: &str, lines: &[StoredLine]) -> Result<(), CartError>;
}

#[async_trait]
impl SessionStore for RedisCache {
    async fn load(&self, key: &str) -> Result<Vec<StoredLine>, CartError> {
        self.get::<Vec<StoredLine>>(key)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| CartError::Session(e.to_string()))
    }

    async fn store(&self, key: &str, lines: &[StoredLine]) -> Result<(), CartError> {
        self.set(key, &lines.to_vec(), None)
            .await
            .map_err(|e| CartError::Session(e.to_string()))
    }
}

/// Cart backend for anonymous callers, keyed by an opaque session id the
/// caller supplies. Same operations, same response shape as the persistent
/// cart.
pub struct SessionCart {
    store: Arc<dyn SessionStore>,
    key: String,
}

impl SessionCart {
    pub fn new(store: Arc<dyn SessionStore>, session_id: &str) -> Self {
        Self {
            store,
            key: keys::session_cart(session_id),
        }
    }
}

#[async_trait]
impl CartBackend for SessionCart {
    async fn list(&self, products: &dyn ProductSource) -> Result<Vec<CartLine>, CartError> {
        let stored = self.store.load(&self.key).await?;
        build_lines(products, &stored).await
    }

    async fn add(
        &self,
        products: &dyn ProductSource,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        check_quantity(quantity)?;
        let product = active_product(products, product_id).await?;

        let mut stored = self.store.load(&self.key).await?;
        match stored.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                ensure_stock(&product, line.quantity + quantity)?;
                line.quantity += quantity;
            }
            None => {
                ensure_stock(&product, quantity)?;
                stored.push(StoredLine {
                    id: Uuid::new_v4(),
                    product_id,
                    quantity,
                });
            }
        }
        self.store.store(&self.key, &stored).await?;

        build_lines(products, &stored).await
    }

    async fn update_item(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        check_quantity(quantity)?;

        let mut stored = self.store.load(&self.key).await?;
        let line = stored
            .iter_mut()
            .find(|l| l.id == item_id)
            .ok_or(CartError::ItemNotFound)?;

        let product = active_product(products, line.product_id).await?;
        ensure_stock(&product, quantity)?;
        line.quantity = quantity;
        self.store.store(&self.key, &stored).await?;

        build_lines(products, &stored).await
    }

    async fn remove(
        &self,
        products: &dyn ProductSource,
        item_id: Uuid,
    ) -> Result<Vec<CartLine>, CartError> {
        let mut stored = self.store.load(&self.key).await?;
        let before = stored.len();
        stored.retain(|l| l.id != item_id);
        if stored.len() == before {
            return Err(CartError::ItemNotFound);
        }
        self.store.store(&self.key, &stored).await?;

        build_lines(products, &stored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::products::{self, ProductStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemoryStore(Mutex<HashMap<String, Vec<StoredLine>>>);

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn load(&self, key: &str) -> Result<Vec<StoredLine>, CartError> {
            Ok(self.0.lock().unwrap().get(key).cloned().unwrap_or_default())
        }

        async fn store(&self, key: &str, lines: &[StoredLine]) -> Result<(), CartError> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), lines.to_vec());
            Ok(())
        }
    }

    struct MemoryProducts(HashMap<Uuid, products::Model>);

    #[async_trait]
    impl ProductSource for MemoryProducts {
        async fn product(&self, id: Uuid) -> Result<Option<products::Model>, CartError> {
            Ok(self.0.get(&id).cloned())
        }
    }

    fn product(stock: i32, status: ProductStatus) -> products::Model {
        products::Model {
            id: Uuid::new_v4(),
            name: "Panier tressé".to_string(),
            description: "Fibres naturelles".to_string(),
            category_id: Uuid::new_v4(),
            artisan_id: None,
            price: Decimal::new(1500, 2),
            stock,
            image: None,
            status,
            variants: serde_json::json!([]),
            created_at: Utc::now(),
        }
    }

    fn setup(products: Vec<products::Model>) -> (SessionCart, MemoryProducts) {
        let store = Arc::new(MemoryStore(Mutex::new(HashMap::new())));
        let cart = SessionCart::new(store, "test-session");
        let source = MemoryProducts(products.into_iter().map(|p| (p.id, p)).collect());
        (cart, source)
    }

    #[tokio::test]
    async fn test_add_then_exceed_stock_then_update_to_boundary() {
        let p = product(5, ProductStatus::Active);
        let pid = p.id;
        let (cart, source) = setup(vec![p]);

        // stock=5: add 3 succeeds
        let lines = cart.add(&source, pid, 3).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);

        // adding 3 more would make 6 > 5
        assert!(matches!(
            cart.add(&source, pid, 3).await,
            Err(CartError::InsufficientStock)
        ));

        // replacing the quantity outright at the stock boundary succeeds
        let item_id = lines[0].id;
        let lines = cart.update_item(&source, item_id, 5).await.unwrap();
        assert_eq!(lines[0].quantity, 5);

        // one past the boundary fails
        assert!(matches!(
            cart.update_item(&source, item_id, 6).await,
            Err(CartError::InsufficientStock)
        ));
    }

    #[tokio::test]
    async fn test_inactive_product_is_rejected() {
        let p = product(10, ProductStatus::Inactive);
        let pid = p.id;
        let (cart, source) = setup(vec![p]);

        assert!(matches!(
            cart.add(&source, pid, 1).await,
            Err(CartError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn test_remove_unknown_item() {
        let (cart, source) = setup(vec![]);
        assert!(matches!(
            cart.remove(&source, Uuid::new_v4()).await,
            Err(CartError::ItemNotFound)
        ));
    }

    #[tokio::test]
    async fn test_deleted_product_surfaces_as_error_on_list() {
        let p = product(5, ProductStatus::Active);
        let pid = p.id;
        let (cart, source) = setup(vec![p]);
        cart.add(&source, pid, 2).await.unwrap();

        // product disappears from the catalog after being added
        let empty = MemoryProducts(HashMap::new());
        assert!(matches!(
            cart.list(&empty).await,
            Err(CartError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn test_quantities_accumulate_on_repeated_add() {
        let p = product(10, ProductStatus::Active);
        let pid = p.id;
        let (cart, source) = setup(vec![p]);

        cart.add(&source, pid, 2).await.unwrap();
        let lines = cart.add(&source, pid, 4).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 6);
    }
}
