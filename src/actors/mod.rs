//! The cart actor: owns the line-item sequence and is its only writer.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};

use crate::catalog::CatalogApi;
use crate::clients::CartClient;
use crate::domain::CartItem;
use crate::error::{CartFailure, StorageError};
use crate::messages::{CartRequest, CartResponse};
use crate::notify::Notifier;
use crate::storage::KeyValueStore;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "@shopcart:cart";

/// Cart state management actor.
///
/// The mailbox serializes mutations: a stock check and the write it guards
/// run to completion before the next request is picked up, even across the
/// network-call suspension points inside one operation.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    items: Vec<CartItem>,
    catalog: Arc<dyn CatalogApi>,
    storage: Arc<dyn KeyValueStore>,
    notifier: Notifier,
    updates: watch::Sender<Vec<CartItem>>,
}

impl CartService {
    /// Loads the persisted cart (empty if none) and wires up the actor.
    ///
    /// A persisted payload that fails to decode is a startup error.
    pub async fn new(
        buffer_size: usize,
        catalog: Arc<dyn CatalogApi>,
        storage: Arc<dyn KeyValueStore>,
        notifier: Notifier,
    ) -> Result<(Self, CartClient, watch::Receiver<Vec<CartItem>>), StorageError> {
        let items: Vec<CartItem> = match storage.get(CART_STORAGE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        let (sender, receiver) = mpsc::channel(buffer_size);
        let (updates, snapshots) = watch::channel(items.clone());
        let service = Self {
            receiver,
            items,
            catalog,
            storage,
            notifier,
            updates,
        };
        let client = CartClient::new(sender);
        Ok((service, client, snapshots))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.items.len(), "CartService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddProduct {
                    product_id,
                    respond_to,
                } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct {
                    product_id,
                    respond_to,
                } => {
                    self.handle_remove_product(product_id, respond_to).await;
                }
                CartRequest::UpdateProductAmount {
                    product_id,
                    amount,
                    respond_to,
                } => {
                    self.handle_update_product_amount(product_id, amount, respond_to)
                        .await;
                }
                CartRequest::GetCart { respond_to } => {
                    self.handle_get_cart(respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
                #[cfg(test)]
                CartRequest::GetItemCount { respond_to } => {
                    let _ = respond_to.send(self.items.len());
                }
            }
        }

        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: u32, respond_to: CartResponse) {
        debug!("Processing add_product request");

        if let Err(failure) = self.try_add_product(product_id).await {
            self.notifier.failure(&failure);
        }
        let _ = respond_to.send(self.items.clone());
    }

    /// Fallible core of `add_product`; the cart is untouched on any `Err`.
    async fn try_add_product(&mut self, product_id: u32) -> Result<(), CartFailure> {
        let position = self.items.iter().position(|item| item.id == product_id);

        let stock = match self.catalog.fetch_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                error!(error = %e, "Stock lookup failed");
                return Err(CartFailure::Addition);
            }
        };

        match position {
            None => {
                if stock.amount == 0 {
                    error!("Product has no sellable stock");
                    return Err(CartFailure::Addition);
                }

                let product = match self.catalog.fetch_product(product_id).await {
                    Ok(product) => product,
                    Err(e) => {
                        error!(error = %e, "Product lookup failed");
                        return Err(CartFailure::Addition);
                    }
                };

                let mut next = self.items.clone();
                next.push(CartItem::from_product(product, 1));
                self.commit(next).await.map_err(|e| {
                    error!(error = %e, "Persisting the cart failed");
                    CartFailure::Addition
                })?;
                info!("Product added to cart");
            }
            Some(index) => {
                let requested = self.items[index].amount + 1;
                if requested > stock.amount {
                    error!(requested, available = stock.amount, "Insufficient stock");
                    return Err(CartFailure::InsufficientStock);
                }

                let mut next = self.items.clone();
                next[index].amount = requested;
                self.commit(next).await.map_err(|e| {
                    error!(error = %e, "Persisting the cart failed");
                    CartFailure::Addition
                })?;
                info!(amount = requested, "Product amount incremented");
            }
        }

        Ok(())
    }

    #[instrument(fields(product_id = %product_id), skip(self, respond_to))]
    async fn handle_remove_product(&mut self, product_id: u32, respond_to: CartResponse) {
        debug!("Processing remove_product request");

        if let Err(failure) = self.try_remove_product(product_id).await {
            self.notifier.failure(&failure);
        }
        let _ = respond_to.send(self.items.clone());
    }

    async fn try_remove_product(&mut self, product_id: u32) -> Result<(), CartFailure> {
        let index = match self.items.iter().position(|item| item.id == product_id) {
            Some(index) => index,
            None => {
                error!("Product not in cart");
                return Err(CartFailure::Removal);
            }
        };

        let mut next = self.items.clone();
        next.remove(index);
        self.commit(next).await.map_err(|e| {
            error!(error = %e, "Persisting the cart failed");
            CartFailure::Removal
        })?;
        info!("Product removed from cart");
        Ok(())
    }

    #[instrument(fields(product_id = %product_id, amount = %amount), skip(self, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        product_id: u32,
        amount: u32,
        respond_to: CartResponse,
    ) {
        debug!("Processing update_product_amount request");

        if let Err(failure) = self.try_update_product_amount(product_id, amount).await {
            self.notifier.failure(&failure);
        }
        let _ = respond_to.send(self.items.clone());
    }

    async fn try_update_product_amount(
        &mut self,
        product_id: u32,
        amount: u32,
    ) -> Result<(), CartFailure> {
        // The operation is only defined for amounts strictly greater than
        // one; reducing to one or below is rejected, not clamped.
        if amount <= 1 {
            error!(amount, "Requested amount below the update threshold");
            return Err(CartFailure::InsufficientStock);
        }

        let stock = match self.catalog.fetch_stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                error!(error = %e, "Stock lookup failed");
                return Err(CartFailure::AmountChange);
            }
        };

        if amount > stock.amount {
            error!(requested = amount, available = stock.amount, "Insufficient stock");
            return Err(CartFailure::InsufficientStock);
        }

        // A product id with no matching line is a silent no-op: the same
        // sequence is persisted and published again.
        let next: Vec<CartItem> = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if item.id == product_id {
                    item.amount = amount;
                }
                item
            })
            .collect();

        self.commit(next).await.map_err(|e| {
            error!(error = %e, "Persisting the cart failed");
            CartFailure::AmountChange
        })?;
        info!(amount, "Product amount updated");
        Ok(())
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_cart(&self, respond_to: CartResponse) {
        debug!("Processing get_cart request");
        let _ = respond_to.send(self.items.clone());
    }

    /// Persist-then-commit: the new sequence is written to storage first,
    /// and only a successful write replaces the in-memory cart and reaches
    /// the snapshot channel.
    async fn commit(&mut self, next: Vec<CartItem>) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&next)?;
        self.storage.set(CART_STORAGE_KEY, &payload).await?;
        self.items = next;
        let _ = self.updates.send(self.items.clone());
        Ok(())
    }
}
