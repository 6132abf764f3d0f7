//! Cart state and its derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line::{CartLineItem, LineId, StoredLine};
use super::reducer::{CartAction, reduce};

/// The contents of a shopper's cart.
///
/// Lines keep the order in which they were first added. Item count and total
/// are computed from the lines on every call.
///
/// Deserializing goes through the reducer: lines are replayed as `AddItem`
/// actions, so a stored cart with duplicate IDs is merged back into one line
/// per ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<StoredLine>,
}

impl From<StoredCart> for CartState {
    fn from(stored: StoredCart) -> Self {
        stored
            .items
            .into_iter()
            .filter(|line| line.quantity > 0)
            .fold(Self::default(), |state, line| {
                reduce(state, &CartAction::AddItem(line.into()))
            })
    }
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn get(&self, id: &LineId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity()))
    }

    /// Sum of `unit_price * quantity` across all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub(super) fn position(&self, id: &LineId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub(super) fn item_mut(&mut self, index: usize) -> Option<&mut CartLineItem> {
        self.items.get_mut(index)
    }

    pub(super) fn push(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    pub(super) fn remove_at(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub(super) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    #[test]
    fn test_empty_cart_totals() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert_eq!(state.item_count(), 0);
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn test_session_round_trip_keeps_lines() {
        let item = CartLineItem::new(ProductId::new(3), "Gorra Rock Vintage", Decimal::new(2499, 2), None)
            .with_quantity(2);
        let state = reduce(CartState::new(), &CartAction::AddItem(item));

        let json = serde_json::to_value(&state).unwrap();
        let restored: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.total(), Decimal::new(4998, 2));
    }

    #[test]
    fn test_stored_cart_is_normalized() {
        let json = serde_json::json!({
            "items": [
                {
                    "id": "5-M", "product_id": 5, "name": "Remera", "unit_price": "20",
                    "image_url": null, "category": "Remeras", "size": "M", "quantity": 1
                },
                {
                    "id": "5-M", "product_id": 5, "name": "Remera", "unit_price": "20",
                    "image_url": null, "category": "Remeras", "size": "M", "quantity": 2
                },
                {
                    "id": "6", "product_id": 6, "name": "Taza", "unit_price": "18.99",
                    "image_url": null, "category": "Accesorios", "size": null, "quantity": 0
                }
            ]
        });

        let state: CartState = serde_json::from_value(json).unwrap();
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.total(), Decimal::from(60));
    }

    #[test]
    fn test_missing_items_field_is_empty_cart() {
        let state: CartState = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(state.is_empty());
    }
}
