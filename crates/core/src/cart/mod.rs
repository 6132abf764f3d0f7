//! Shopping cart state and transitions.
//!
//! A cart is a list of [`CartLineItem`]s keyed by [`LineId`]. The only way to
//! change a [`CartState`] is to run a [`CartAction`] through [`reduce`], either
//! directly or through a [`CartStore`] that also notifies subscribers.
//!
//! Item count and total are computed from the lines on every read and are never
//! stored alongside them.

mod line;
mod reducer;
mod state;
mod store;

pub use line::{CartLineItem, LineId, ProductSnapshot, SnapshotError};
pub use reducer::{CartAction, reduce};
pub use state::CartState;
pub use store::{CartStore, SubscriptionId};
