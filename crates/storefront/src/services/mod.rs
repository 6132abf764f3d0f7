//! Business logic services for the storefront.
//!
//! - `catalog` - Cached catalog reads on top of the repositories
//! - `cloudinary` - Delivery-time image transformations
//! - `whatsapp` - Click-to-chat links carrying order and reservation messages

pub mod catalog;
pub mod cloudinary;
pub mod whatsapp;

pub use catalog::CatalogService;
pub use cloudinary::{ImageOptions, optimize_image_url};
pub use whatsapp::whatsapp_link;
