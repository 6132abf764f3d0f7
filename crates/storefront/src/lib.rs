//! Locura y Realidad storefront library.
//!
//! Exposes the router, state and configuration so the binary stays thin and
//! handlers can be unit tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
