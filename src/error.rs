use thiserror::Error;

/// User-visible operation failures.
///
/// The `Display` text of each variant is exactly the message delivered on
/// the notification channel. Consumers only ever see the message string,
/// never the variant, so the taxonomy lives in the text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartFailure {
    #[error("Could not add the product")]
    Addition,
    #[error("Requested quantity is out of stock")]
    InsufficientStock,
    #[error("Could not remove the product")]
    Removal,
    #[error("Could not change the product quantity")]
    AmountChange,
}

/// Faults in the client/actor channel itself.
#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failures talking to the remote stock/product endpoints.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),
    #[error("api error: status {0}: {1}")]
    Api(u16, String),
    #[error("malformed response body: {0}")]
    Parse(String),
}

/// Failures reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persisted cart payload is not valid: {0}")]
    Payload(#[from] serde_json::Error),
}
