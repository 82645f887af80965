use tokio::sync::oneshot;

use crate::domain::CartItem;

/// Responds with the cart snapshot current after the operation ran.
///
/// Failed operations respond with the unchanged snapshot; the failure
/// itself travels on the notification channel, never through this sender.
pub type CartResponse = oneshot::Sender<Vec<CartItem>>;

/// Typed messages for the cart actor. Each variant carries its parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum CartRequest {
    AddProduct {
        product_id: u32,
        respond_to: CartResponse,
    },
    RemoveProduct {
        product_id: u32,
        respond_to: CartResponse,
    },
    UpdateProductAmount {
        product_id: u32,
        amount: u32,
        respond_to: CartResponse,
    },
    GetCart {
        respond_to: CartResponse,
    },
    Shutdown,
    #[cfg(test)]
    GetItemCount {
        respond_to: oneshot::Sender<usize>,
    },
}
