//! Session-related types.

/// Session keys for values stored per visitor.
pub mod keys {
    /// Key for the visitor's cart (`locura_core::CartState`).
    pub const CART: &str = "cart";
}
