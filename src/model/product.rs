use serde::{Deserialize, Serialize};

/// Identifier shared by the catalog, the stock service and cart line items.
pub type ProductId = u64;

/// A catalog record as returned by the Catalog Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// A cart line item.
///
/// Carries the catalog fields captured when the product was added plus the
/// requested `amount`, which is always at least 1 while the item is in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl Product {
    /// Creates a new line item.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display title
    /// * `price` - Unit price
    /// * `image` - Image URL
    /// * `amount` - Requested quantity
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        amount: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount,
        }
    }

    /// Builds a line item from a catalog record with the given amount.
    pub fn from_catalog(catalog: CatalogProduct, amount: u32) -> Self {
        Self {
            id: catalog.id,
            title: catalog.title,
            price: catalog.price,
            image: catalog.image,
            amount,
        }
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_catalog_keeps_catalog_fields() {
        let catalog = CatalogProduct {
            id: 7,
            title: "Running shoe".into(),
            price: 139.9,
            image: "https://cdn.example.com/7.jpg".into(),
        };

        let product = Product::from_catalog(catalog, 2);

        assert_eq!(product, Product::new(7, "Running shoe", 139.9, "https://cdn.example.com/7.jpg", 2));
    }

    #[test]
    fn test_subtotal() {
        let product = Product::new(1, "Sneaker", 10.5, "img", 4);
        assert_eq!(product.subtotal(), 42.0);
    }
}
