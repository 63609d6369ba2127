//! Product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// Image used for locally created products when none is supplied.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/images/default-product.png";

/// Category used for locally created products when none is supplied.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// A catalog product.
///
/// Shape matches the demo API's `/products` payload; prices are kept as
/// decimals in memory and written back as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Customer rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    /// Case-insensitive title substring match.
    ///
    /// An empty or whitespace-only term matches every product.
    #[must_use]
    pub fn matches_title(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty() || self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Keep the products whose title contains `term`, preserving order.
#[must_use]
pub fn filter_by_title<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches_title(term)).collect()
}

/// Form input for a product created on this device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl NewProduct {
    /// Build the product record with the given identifier.
    ///
    /// Blank image and category fall back to [`DEFAULT_PRODUCT_IMAGE`] and
    /// [`DEFAULT_CATEGORY`]; the rating starts at zero.
    #[must_use]
    pub fn into_product(self, id: RecordId) -> Product {
        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let image = self
            .image
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_IMAGE.to_string());

        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category,
            image,
            rating: Rating::default(),
        }
    }
}
