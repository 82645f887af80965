use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::CartItem;
use crate::error::CartError;
use crate::messages::CartRequest;

/// Generate client methods with oneshot channel boilerplate and automatic
/// tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, CartError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| CartError::ActorCommunicationError("cart service closed".to_string()))?;

                response.await.map_err(|_| CartError::ActorCommunicationError("cart service dropped the request".to_string()))
            }
        }
    };
}

/// Cloneable handle to the cart actor.
///
/// A thin wrapper around the message channel; every UI consumer holds one
/// of these. Mutation methods resolve to the cart snapshot current after
/// the operation ran — on failure that is the unchanged prior sequence,
/// and the failure message arrives on the notification channel instead.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Manual method for the one request without a response channel.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("cart service closed".to_string()))
    }
}

client_method!(CartClient => fn add_product(product_id: u32) -> Vec<CartItem> as CartRequest::AddProduct);
client_method!(CartClient => fn remove_product(product_id: u32) -> Vec<CartItem> as CartRequest::RemoveProduct);
client_method!(CartClient => fn update_product_amount(product_id: u32, amount: u32) -> Vec<CartItem> as CartRequest::UpdateProductAmount);
client_method!(CartClient => fn get_cart() -> Vec<CartItem> as CartRequest::GetCart);

// Test-only method for internal state inspection.
#[cfg(test)]
client_method!(CartClient => fn get_item_count() -> usize as CartRequest::GetItemCount);
