//! Cart line items and their construction from catalog products.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Identifier of a cart line.
///
/// Composed from the product ID and the selected size, so the same product in
/// two sizes occupies two lines: `"12"` without a size, `"12-M"` with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Build the line ID for a product and optional size.
    #[must_use]
    pub fn new(product_id: ProductId, size: Option<&str>) -> Self {
        match size {
            Some(size) => Self(format!("{product_id}-{size}")),
            None => Self(product_id.to_string()),
        }
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line IDs come back from forms as plain strings.
impl From<String> for LineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for LineId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Errors raised when a catalog product cannot become a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The product is marked as out of stock.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The product has no usable name.
    #[error("product {0} has no name")]
    MissingName(ProductId),

    /// The product price is negative.
    #[error("product {0} has an invalid price")]
    InvalidPrice(ProductId),

    /// The product comes in sizes but none was selected.
    #[error("a size must be selected for product {0}")]
    SizeRequired(ProductId),

    /// The selected size is not offered for the product.
    #[error("size {size} is not available for product {product_id}")]
    UnknownSize {
        /// Product the size was requested for.
        product_id: ProductId,
        /// The rejected size label.
        size: String,
    },
}

/// The catalog data the cart needs about a product at add-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub category: String,
    pub in_stock: bool,
    /// Size labels offered for this product. Empty when it has no variants.
    pub sizes: Vec<String>,
}

/// One row of the cart: a product, an optional size and a quantity.
///
/// Display data is copied from the product when the line is created, so later
/// catalog edits do not change what the shopper already put in the cart.
///
/// Deserialized lines get their ID rebuilt from product and size, and a
/// quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredLine")]
pub struct CartLineItem {
    id: LineId,
    product_id: ProductId,
    name: String,
    unit_price: Decimal,
    image_url: Option<String>,
    category: String,
    size: Option<String>,
    quantity: u32,
}

/// A line as found on the wire or in a session, before normalization.
#[derive(Deserialize)]
pub(crate) struct StoredLine {
    product_id: ProductId,
    name: String,
    unit_price: Decimal,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    size: Option<String>,
    pub(crate) quantity: u32,
}

impl From<StoredLine> for CartLineItem {
    fn from(stored: StoredLine) -> Self {
        Self::new(stored.product_id, stored.name, stored.unit_price, stored.size)
            .with_image(stored.image_url)
            .with_category(stored.category)
            .with_quantity(stored.quantity)
    }
}

impl CartLineItem {
    /// Create a line with quantity 1.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        size: Option<String>,
    ) -> Self {
        Self {
            id: LineId::new(product_id, size.as_deref()),
            product_id,
            name: name.into(),
            unit_price,
            image_url: None,
            category: String::new(),
            size,
            quantity: 1,
        }
    }

    /// Validate a catalog product and turn it into a cart line.
    ///
    /// A size is required when the product offers sizes and ignored when it
    /// does not. A quantity of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the product is out of stock, has no name,
    /// has a negative price, or the size selection does not match its sizes.
    pub fn from_snapshot(
        product: &ProductSnapshot,
        size: Option<&str>,
        quantity: u32,
    ) -> Result<Self, SnapshotError> {
        if product.name.trim().is_empty() {
            return Err(SnapshotError::MissingName(product.id));
        }
        if product.price.is_sign_negative() {
            return Err(SnapshotError::InvalidPrice(product.id));
        }
        if !product.in_stock {
            return Err(SnapshotError::OutOfStock(product.id));
        }

        let size = if product.sizes.is_empty() {
            None
        } else {
            let selected = size
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(SnapshotError::SizeRequired(product.id))?;
            if !product.sizes.iter().any(|s| s == selected) {
                return Err(SnapshotError::UnknownSize {
                    product_id: product.id,
                    size: selected.to_owned(),
                });
            }
            Some(selected.to_owned())
        };

        Ok(Self::new(product.id, product.name.trim(), product.price, size)
            .with_image(product.image.clone())
            .with_category(product.category.clone())
            .with_quantity(quantity))
    }

    /// Set the quantity. Zero is raised to one; lines never hold zero units.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub const fn id(&self) -> &LineId {
        &self.id
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Number of units on this line (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity.max(1));
    }

    pub(crate) const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn remera() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(2),
            name: "Remera".to_owned(),
            price: Decimal::from(20),
            image: Some("https://res.cloudinary.com/demo/image/upload/remera.png".to_owned()),
            category: "Remeras".to_owned(),
            in_stock: true,
            sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned()],
        }
    }

    fn pin_set() -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(1),
            name: "Pin Set Rock Icons".to_owned(),
            price: Decimal::new(1599, 2),
            image: None,
            category: "Pins".to_owned(),
            in_stock: true,
            sizes: Vec::new(),
        }
    }

    #[test]
    fn test_line_id_composition() {
        assert_eq!(LineId::new(ProductId::new(2), Some("M")).as_str(), "2-M");
        assert_eq!(LineId::new(ProductId::new(1), None).as_str(), "1");
    }

    #[test]
    fn test_from_snapshot_with_size() {
        let line = CartLineItem::from_snapshot(&remera(), Some("M"), 2).unwrap();
        assert_eq!(line.id().as_str(), "2-M");
        assert_eq!(line.size(), Some("M"));
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.category(), "Remeras");
        assert_eq!(line.line_total(), Decimal::from(40));
    }

    #[test]
    fn test_from_snapshot_requires_size() {
        let err = CartLineItem::from_snapshot(&remera(), None, 1).unwrap_err();
        assert_eq!(err, SnapshotError::SizeRequired(ProductId::new(2)));

        let err = CartLineItem::from_snapshot(&remera(), Some("  "), 1).unwrap_err();
        assert_eq!(err, SnapshotError::SizeRequired(ProductId::new(2)));
    }

    #[test]
    fn test_from_snapshot_rejects_unknown_size() {
        let err = CartLineItem::from_snapshot(&remera(), Some("XXL"), 1).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownSize { ref size, .. } if size == "XXL"));
    }

    #[test]
    fn test_from_snapshot_ignores_size_without_variants() {
        let line = CartLineItem::from_snapshot(&pin_set(), Some("M"), 1).unwrap();
        assert_eq!(line.size(), None);
        assert_eq!(line.id().as_str(), "1");
    }

    #[test]
    fn test_from_snapshot_zero_quantity_becomes_one() {
        let line = CartLineItem::from_snapshot(&pin_set(), None, 0).unwrap();
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_deserialize_rebuilds_id_and_clamps_quantity() {
        let line: CartLineItem = serde_json::from_value(serde_json::json!({
            "id": "bogus",
            "product_id": 2,
            "name": "Remera",
            "unit_price": "20",
            "size": "M",
            "quantity": 0
        }))
        .unwrap();
        assert_eq!(line.id().as_str(), "2-M");
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.line_total(), Decimal::from(20));
    }

    #[test]
    fn test_serialized_line_reads_back_unchanged() {
        let line = CartLineItem::from_snapshot(&remera(), Some("L"), 3).unwrap();
        let json = serde_json::to_value(&line).unwrap();
        let back: CartLineItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_from_snapshot_rejects_out_of_stock() {
        let mut product = pin_set();
        product.in_stock = false;
        assert_eq!(
            CartLineItem::from_snapshot(&product, None, 1),
            Err(SnapshotError::OutOfStock(ProductId::new(1)))
        );
    }

    #[test]
    fn test_from_snapshot_rejects_malformed_products() {
        let mut product = pin_set();
        product.price = Decimal::from(-5);
        assert_eq!(
            CartLineItem::from_snapshot(&product, None, 1),
            Err(SnapshotError::InvalidPrice(ProductId::new(1)))
        );

        let mut product = pin_set();
        product.name = "   ".to_owned();
        assert_eq!(
            CartLineItem::from_snapshot(&product, None, 1),
            Err(SnapshotError::MissingName(ProductId::new(1)))
        );
    }
}
