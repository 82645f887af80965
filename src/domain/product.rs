use serde::{Deserialize, Serialize};

/// A product as reported by the remote catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl Product {
    pub fn new(id: u32, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}
