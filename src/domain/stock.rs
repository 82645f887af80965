use serde::{Deserialize, Serialize};

/// Stock level for one product as reported by the remote stock endpoint.
///
/// `amount` is the maximum sellable quantity at query time; it is only
/// consulted at mutation time, never enforced continuously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: u32,
    pub amount: u32,
}
