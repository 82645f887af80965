use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{error, info};

use crate::actors::CartService;
use crate::catalog::HttpCatalog;
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::domain::CartItem;
use crate::error::StorageError;
use crate::notify::Notifier;
use crate::storage::FileStore;

/// The application system: wires the catalog client, the storage backend
/// and the notifier into a running cart actor, and owns its lifecycle.
///
/// Constructed once at application start and passed by reference to
/// consumers; there is no hidden global.
pub struct CartSystem {
    pub cart_client: CartClient,
    notifier: Notifier,
    snapshots: watch::Receiver<Vec<CartItem>>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Start the cart actor against the configured backend and storage.
    ///
    /// Fails if a persisted cart exists but cannot be decoded.
    pub async fn start(config: CartConfig) -> Result<Self, StorageError> {
        info!(api = %config.api_base_url, "Starting cart system");

        let catalog = Arc::new(HttpCatalog::new(config.api_base_url));
        let storage = Arc::new(FileStore::new(config.storage_dir));
        let notifier = Notifier::new(16);

        let (service, cart_client, snapshots) =
            CartService::new(32, catalog, storage, notifier.clone()).await?;
        let handle = tokio::spawn(service.run());

        info!("Cart system started successfully");

        Ok(Self {
            cart_client,
            notifier,
            snapshots,
            handles: vec![handle],
        })
    }

    /// Failure messages, in the order they were raised.
    pub fn notifications(&self) -> broadcast::Receiver<String> {
        self.notifier.subscribe()
    }

    /// Cart snapshots; the initial value is the cart as loaded at startup.
    pub fn snapshots(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshots.clone()
    }

    /// Gracefully shut down the actor and wait for it to stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");

        let _ = self.cart_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Cart service shutdown error");
            }
        }

        info!("Cart system shutdown complete");
        Ok(())
    }
}
