//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

use locura_core::Price;

use crate::services::{ImageOptions, optimize_image_url};

/// Width used for card thumbnails in listings.
const THUMBNAIL_WIDTH: u32 = 400;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format an amount in pesos, e.g. `$40.00`.
///
/// Values that are not decimals are rendered unchanged.
///
/// Usage in templates: `{{ product.price|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

fn format_money(raw: &str) -> String {
    Decimal::from_str(raw.trim()).map_or_else(|_| raw.to_string(), |amount| Price::ars(amount).display())
}

/// Optimized Cloudinary delivery URL at the default width (800px).
///
/// Usage in templates: `{{ tour.image|cloudinary }}`
#[askama::filter_fn]
pub fn cloudinary(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(optimize_image_url(&url.to_string(), &ImageOptions::default()))
}

/// Optimized Cloudinary delivery URL at thumbnail width.
///
/// Usage in templates: `{{ photo.src|thumbnail }}`
#[askama::filter_fn]
pub fn thumbnail(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(optimize_image_url(
        &url.to_string(),
        &ImageOptions::width(THUMBNAIL_WIDTH),
    ))
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("40"), "$40.00");
        assert_eq!(format_money("18.99"), "$18.99");
        assert_eq!(format_money("12.346"), "$12.35");
        assert_eq!(format_money("n/a"), "n/a");
    }
}
