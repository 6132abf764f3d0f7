//! Core types for Locura y Realidad.
//!
//! This module provides type-safe wrappers for catalog identifiers and prices.

pub mod id;
pub mod price;

pub use id::*;
pub use price::{CurrencyCode, Price};
