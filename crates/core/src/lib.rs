//! Locura y Realidad Core - cart, checkout and shared types.
//!
//! This crate holds the domain logic shared by the workspace:
//! - `storefront` - Public site (merch shop, tours, gallery)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. The web layer loads a [`CartState`] from the session, wraps
//! it in a [`CartStore`], dispatches [`CartAction`]s and writes the result back.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and prices
//! - [`cart`] - Cart line items, state, reducer and store
//! - [`checkout`] - Order and tour reservation message composers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{
    CartAction, CartLineItem, CartState, CartStore, LineId, ProductSnapshot, SnapshotError,
    SubscriptionId, reduce,
};
pub use checkout::{
    CheckoutDetails, CustomerName, Delivery, DeliveryKind, PaymentMethod, ReservationDetails,
    TourSummary, compose_order_message, compose_reservation_message,
};
pub use types::*;
