//! Cart actions and the reducer that applies them.

use serde::{Deserialize, Serialize};

use super::line::{CartLineItem, LineId};
use super::state::CartState;

/// A change requested by the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add a line, or increase the quantity of the line with the same ID.
    AddItem(CartLineItem),
    /// Set a line's quantity. Zero or negative removes the line.
    UpdateQuantity { id: LineId, quantity: i64 },
    /// Remove a line.
    RemoveItem(LineId),
    /// Empty the cart.
    #[serde(rename = "CLEAR_CART")]
    Clear,
}

impl CartAction {
    /// Wire name of the action, as used in the serialized `type` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "ADD_ITEM",
            Self::UpdateQuantity { .. } => "UPDATE_QUANTITY",
            Self::RemoveItem(_) => "REMOVE_ITEM",
            Self::Clear => "CLEAR_CART",
        }
    }
}

/// Apply an action to a cart state and return the new state.
///
/// Updates and removals that name a line not in the cart leave the state
/// unchanged; a late click on an already removed line is not an error.
#[must_use]
pub fn reduce(mut state: CartState, action: &CartAction) -> CartState {
    match action {
        CartAction::AddItem(item) => match state.position(item.id()) {
            Some(index) => {
                if let Some(existing) = state.item_mut(index) {
                    existing.add_quantity(item.quantity());
                }
            }
            None => state.push(item.clone().with_quantity(item.quantity())),
        },
        CartAction::UpdateQuantity { id, quantity } => {
            if let Some(index) = state.position(id) {
                if *quantity <= 0 {
                    state.remove_at(index);
                } else if let Some(existing) = state.item_mut(index) {
                    existing.set_quantity(u32::try_from(*quantity).unwrap_or(u32::MAX));
                }
            }
        }
        CartAction::RemoveItem(id) => {
            if let Some(index) = state.position(id) {
                state.remove_at(index);
            }
        }
        CartAction::Clear => state.clear(),
    }
    state
}
