//! Catalog domain types.
//!
//! Rows are read with `sqlx::FromRow`; internal fields (cost price, CDN public
//! IDs) are skipped when the types are serialized for the public API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use locura_core::{AlbumId, PhotoId, ProductId, ProductSnapshot, TourId, TourSummary};

/// A merchandise product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Price before discount, shown struck through when present.
    pub original_price: Option<Decimal>,
    #[serde(skip)]
    pub cost_price: Decimal,
    pub image: String,
    #[serde(skip)]
    pub image_public_id: Option<String>,
    pub category: String,
    pub rating: f64,
    pub in_stock: bool,
    /// Size labels in display order. Empty for products without sizes.
    pub sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The subset of product data a cart line is built from.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: Some(self.image.clone()).filter(|image| !image.is_empty()),
            category: self.category.clone(),
            in_stock: self.in_stock,
            sizes: self.sizes.clone(),
        }
    }

    #[must_use]
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }
}

/// A guided music tour.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tour {
    pub id: TourId,
    pub title: String,
    pub description: String,
    pub destination: String,
    /// Free-text date range, e.g. "15-22 Marzo".
    pub dates: String,
    pub price: Decimal,
    pub image: String,
    /// Optional group label used for filtering (e.g. "Europa").
    pub grupo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tour {
    #[must_use]
    pub fn summary(&self) -> TourSummary {
        TourSummary {
            title: self.title.clone(),
            destination: self.destination.clone(),
            dates: self.dates.clone(),
        }
    }
}

/// Distinct filter values across all tours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TourFilters {
    pub destinations: Vec<String>,
    pub grupos: Vec<String>,
}

impl TourFilters {
    /// Collect sorted, de-duplicated destinations and non-empty grupos.
    #[must_use]
    pub fn from_tours<'a>(tours: impl IntoIterator<Item = &'a Tour>) -> Self {
        let mut destinations = Vec::new();
        let mut grupos = Vec::new();
        for tour in tours {
            destinations.push(tour.destination.clone());
            if let Some(grupo) = tour.grupo.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                grupos.push(grupo.to_owned());
            }
        }
        destinations.sort();
        destinations.dedup();
        grupos.sort();
        grupos.dedup();
        Self {
            destinations,
            grupos,
        }
    }
}

/// A gallery photo.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Photo {
    pub id: PhotoId,
    pub src: String,
    pub alt: String,
    pub title: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// A photo inside an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPhoto {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A titled set of photos from one trip or show.
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub photos: Vec<AlbumPhoto>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tour(id: i32, destination: &str, grupo: Option<&str>) -> Tour {
        Tour {
            id: TourId::new(id),
            title: format!("Tour {id}"),
            description: String::new(),
            destination: destination.to_owned(),
            dates: "5-12 Abril".to_owned(),
            price: Decimal::from(2199),
            image: String::new(),
            grupo: grupo.map(str::to_owned),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_tour_filters_sorted_and_deduplicated() {
        let tours = [
            tour(1, "Seattle, Estados Unidos", Some("América")),
            tour(2, "Londres, Reino Unido", Some("Europa")),
            tour(3, "Berlín - Hamburgo, Alemania", Some("Europa")),
            tour(4, "Londres, Reino Unido", Some("  ")),
            tour(5, "Seattle, Estados Unidos", None),
        ];

        let filters = TourFilters::from_tours(&tours);
        assert_eq!(
            filters.destinations,
            [
                "Berlín - Hamburgo, Alemania",
                "Londres, Reino Unido",
                "Seattle, Estados Unidos"
            ]
        );
        assert_eq!(filters.grupos, ["América", "Europa"]);
    }

    #[test]
    fn test_product_snapshot_drops_empty_image() {
        let product = Product {
            id: ProductId::new(1),
            name: "Parche Bordado Logo".to_owned(),
            description: String::new(),
            price: Decimal::new(999, 2),
            original_price: None,
            cost_price: Decimal::from(3),
            image: String::new(),
            image_public_id: None,
            category: "Parches".to_owned(),
            rating: 4.8,
            in_stock: true,
            sizes: Vec::new(),
            created_at: Utc::now(),
        };

        let snapshot = product.snapshot();
        assert_eq!(snapshot.image, None);
        assert_eq!(snapshot.price, Decimal::new(999, 2));
        assert!(!product.has_sizes());
    }

    #[test]
    fn test_public_json_hides_internal_fields() {
        let product = Product {
            id: ProductId::new(2),
            name: "Remera".to_owned(),
            description: String::new(),
            price: Decimal::from(20),
            original_price: None,
            cost_price: Decimal::from(8),
            image: "remera.png".to_owned(),
            image_public_id: Some("products/remera".to_owned()),
            category: "Remeras".to_owned(),
            rating: 5.0,
            in_stock: true,
            sizes: vec!["M".to_owned()],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&product).unwrap_or_default();
        assert!(json.get("cost_price").is_none());
        assert!(json.get("image_public_id").is_none());
        assert_eq!(json["name"], "Remera");
    }
}
