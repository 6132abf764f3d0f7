//! Domain models for the storefront.
//!
//! - [`catalog`] - Products, tours, photos and albums as stored in `PostgreSQL`
//! - [`session`] - Keys for values kept in the visitor's session

pub mod catalog;
pub mod session;

pub use catalog::{Album, AlbumPhoto, Photo, Product, Tour, TourFilters};
pub use session::keys as session_keys;
