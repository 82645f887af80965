use serde::{Deserialize, Serialize};

use super::Product;

/// One line of the cart: a product plus the requested quantity.
///
/// Display fields are copied verbatim from the catalog response at the
/// moment the product is added; later catalog changes do not rewrite
/// existing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_display_fields_from_product() {
        let product = Product::new(7, "Sneaker", 139.9, "/img/sneaker.jpg");
        let item = CartItem::from_product(product.clone(), 1);

        assert_eq!(item.id, product.id);
        assert_eq!(item.title, product.title);
        assert_eq!(item.price, product.price);
        assert_eq!(item.image, product.image);
        assert_eq!(item.amount, 1);
    }

    #[test]
    fn serializes_with_the_persisted_field_names() {
        let item = CartItem {
            id: 1,
            title: "Sneaker".to_string(),
            price: 139.9,
            image: "/img/sneaker.jpg".to_string(),
            amount: 2,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "title": "Sneaker",
                "price": 139.9,
                "image": "/img/sneaker.jpg",
                "amount": 2
            })
        );
    }
}
