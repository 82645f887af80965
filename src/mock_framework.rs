//! # Mock Framework
//!
//! Test doubles for exercising the cart actor in isolation: a scriptable
//! catalog, failure-injecting storage, and a helper that wires an actor
//! over whichever doubles a test needs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{broadcast, watch};

use crate::actors::CartService;
use crate::catalog::CatalogApi;
use crate::clients::CartClient;
use crate::domain::{CartItem, Product, Stock};
use crate::error::{CatalogError, StorageError};
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, MemoryStore};

/// In-process catalog with scripted products and stock levels.
///
/// `set_offline(true)` makes every request fail with a network error, the
/// way an unreachable backend would.
pub struct MockCatalog {
    products: Mutex<HashMap<u32, Product>>,
    stock: Mutex<HashMap<u32, u32>>,
    offline: AtomicBool,
}

impl MockCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            products: Mutex::new(HashMap::new()),
            stock: Mutex::new(HashMap::new()),
            offline: AtomicBool::new(false),
        })
    }

    pub fn put_product(&self, product: Product, stock_amount: u32) {
        self.stock.lock().unwrap().insert(product.id, stock_amount);
        self.products.lock().unwrap().insert(product.id, product);
    }

    pub fn set_stock(&self, product_id: u32, amount: u32) {
        self.stock.lock().unwrap().insert(product_id, amount);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn fetch_stock(&self, product_id: u32) -> Result<Stock, CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Network("connection refused".to_string()));
        }
        match self.stock.lock().unwrap().get(&product_id) {
            Some(amount) => Ok(Stock {
                id: product_id,
                amount: *amount,
            }),
            None => Err(CatalogError::Api(404, "Not Found".to_string())),
        }
    }

    async fn fetch_product(&self, product_id: u32) -> Result<Product, CatalogError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Network("connection refused".to_string()));
        }
        match self.products.lock().unwrap().get(&product_id) {
            Some(product) => Ok(product.clone()),
            None => Err(CatalogError::Api(404, "Not Found".to_string())),
        }
    }
}

/// Storage wrapper that can be told to fail its writes, for proving that a
/// failed persist leaves no partial state.
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.set(key, value).await
    }
}

/// Spins up a cart actor over the given doubles and returns the client, a
/// notification receiver (subscribed before anything can fire), and the
/// snapshot watch.
pub async fn start_cart(
    catalog: Arc<dyn CatalogApi>,
    storage: Arc<dyn KeyValueStore>,
) -> (
    CartClient,
    broadcast::Receiver<String>,
    watch::Receiver<Vec<CartItem>>,
) {
    let notifier = Notifier::new(16);
    let notifications = notifier.subscribe();
    let (service, client, snapshots) = CartService::new(8, catalog, storage, notifier)
        .await
        .expect("cart service should start");
    tokio::spawn(service.run());
    (client, notifications, snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_catalog_serves_scripted_stock() {
        let catalog = MockCatalog::new();
        catalog.put_product(Product::new(1, "Sneaker", 139.9, "/img/1.jpg"), 5);

        let stock = catalog.fetch_stock(1).await.unwrap();
        assert_eq!(stock, Stock { id: 1, amount: 5 });

        assert!(catalog.fetch_stock(2).await.is_err());
    }

    #[tokio::test]
    async fn mock_catalog_goes_offline() {
        let catalog = MockCatalog::new();
        catalog.put_product(Product::new(1, "Sneaker", 139.9, "/img/1.jpg"), 5);
        catalog.set_offline(true);

        assert!(matches!(
            catalog.fetch_stock(1).await,
            Err(CatalogError::Network(_))
        ));
        assert!(matches!(
            catalog.fetch_product(1).await,
            Err(CatalogError::Network(_))
        ));
    }
}
