//! Seed the catalog tables from a YAML file.
//!
//! The file lists `tours`, `products` and `photos`. Seeding validates the
//! whole file first, then replaces all three tables in one transaction so the
//! storefront never sees a half-seeded catalog.

use std::path::Path;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, info};

/// Contents of a catalog seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSeed {
    #[serde(default)]
    pub tours: Vec<TourSeed>,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    #[serde(default)]
    pub photos: Vec<PhotoSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TourSeed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub destination: String,
    pub dates: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub grupo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_public_id: Option<String>,
    pub category: String,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub sizes: Vec<String>,
}

const fn default_rating() -> f64 {
    5.0
}

const fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhotoSeed {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub location: String,
}

/// Parse a catalog seed from YAML text.
///
/// # Errors
///
/// Returns the YAML error if the text is malformed or has unknown fields.
pub fn parse(content: &str) -> Result<CatalogSeed, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Check a parsed seed for values the storefront cannot display or sell.
///
/// Returns one message per problem; an empty list means the seed is valid.
#[must_use]
pub fn validate(seed: &CatalogSeed) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, tour) in seed.tours.iter().enumerate() {
        let at = format!("tours[{i}]");
        for (field, value) in [
            ("title", &tour.title),
            ("destination", &tour.destination),
            ("dates", &tour.dates),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{at}: {field} is empty"));
            }
        }
        if tour.price.is_sign_negative() {
            errors.push(format!("{at}: price is negative"));
        }
    }

    for (i, product) in seed.products.iter().enumerate() {
        let at = format!("products[{i}] ({})", product.name);
        if product.name.trim().is_empty() {
            errors.push(format!("{at}: name is empty"));
        }
        if product.category.trim().is_empty() {
            errors.push(format!("{at}: category is empty"));
        }
        if product.price.is_sign_negative() {
            errors.push(format!("{at}: price is negative"));
        }
        if product.original_price.is_some_and(|original| original < product.price) {
            errors.push(format!("{at}: original_price is below price"));
        }
        if !(0.0..=5.0).contains(&product.rating) {
            errors.push(format!("{at}: rating must be between 0 and 5"));
        }
        for (j, size) in product.sizes.iter().enumerate() {
            if size.trim().is_empty() {
                errors.push(format!("{at}: sizes[{j}] is empty"));
            } else if product.sizes.iter().take(j).any(|earlier| earlier == size) {
                errors.push(format!("{at}: size {size} is listed twice"));
            }
        }
    }

    for (i, photo) in seed.photos.iter().enumerate() {
        if photo.src.trim().is_empty() {
            errors.push(format!("photos[{i}]: src is empty"));
        }
    }

    errors
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `dry_run` - If true, parse and validate only
///
/// # Errors
///
/// Returns an error if the database URL is missing, the file cannot be read
/// or fails validation, or a database operation fails. On a database error
/// the transaction is rolled back and the previous catalog is kept.
pub async fn catalog(file_path: &str, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    let content = tokio::fs::read_to_string(path).await?;
    let seed = parse(&content)?;

    info!(
        tours = seed.tours.len(),
        products = seed.products.len(),
        photos = seed.photos.len(),
        "Parsed catalog"
    );

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    if dry_run {
        info!("Catalog is valid (dry run, nothing written)");
        return Ok(());
    }

    let database_url = super::database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;
    info!("Connected to database");

    let mut tx = pool.begin().await?;
    replace_catalog(&mut tx, &seed).await?;
    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Tours inserted: {}", seed.tours.len());
    info!("  Products inserted: {}", seed.products.len());
    info!("  Photos inserted: {}", seed.photos.len());

    Ok(())
}

async fn replace_catalog(
    tx: &mut Transaction<'_, Postgres>,
    seed: &CatalogSeed,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tours").execute(&mut **tx).await?;
    sqlx::query("DELETE FROM products").execute(&mut **tx).await?;
    sqlx::query("DELETE FROM photos").execute(&mut **tx).await?;

    for tour in &seed.tours {
        sqlx::query(
            r"
            INSERT INTO tours (title, description, destination, dates, price, image, grupo)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&tour.title)
        .bind(&tour.description)
        .bind(&tour.destination)
        .bind(&tour.dates)
        .bind(tour.price)
        .bind(&tour.image)
        .bind(tour.grupo.as_deref().map(str::trim).filter(|g| !g.is_empty()))
        .execute(&mut **tx)
        .await?;
    }

    for product in &seed.products {
        sqlx::query(
            r"
            INSERT INTO products (
                name, description, price, original_price, cost_price,
                image, image_public_id, category, rating, in_stock, sizes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.original_price)
        .bind(product.cost_price)
        .bind(&product.image)
        .bind(&product.image_public_id)
        .bind(&product.category)
        .bind(product.rating)
        .bind(product.in_stock)
        .bind(&product.sizes)
        .execute(&mut **tx)
        .await?;
    }

    for photo in &seed.photos {
        sqlx::query("INSERT INTO photos (src, alt, title, location) VALUES ($1, $2, $3, $4)")
            .bind(&photo.src)
            .bind(&photo.alt)
            .bind(&photo.title)
            .bind(&photo.location)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STARTER_CATALOG: &str = include_str!("../../seeds/catalog.yaml");

    #[test]
    fn test_starter_catalog_is_valid() {
        let seed = parse(STARTER_CATALOG).unwrap();
        assert_eq!(seed.tours.len(), 3);
        assert_eq!(seed.products.len(), 6);
        assert_eq!(seed.photos.len(), 6);
        assert_eq!(validate(&seed), Vec::<String>::new());

        let mug = seed.products.iter().find(|p| p.category == "Accesorios").unwrap();
        assert!(!mug.in_stock);
        assert_eq!(mug.price, Decimal::new(1899, 2));
        assert_eq!(mug.cost_price, Decimal::ZERO);
    }

    #[test]
    fn test_product_defaults() {
        let seed = parse(
            r"
products:
  - name: Pin
    price: '3.50'
    category: Pins
",
        )
        .unwrap();
        let pin = &seed.products[0];
        assert!(pin.in_stock);
        assert!(pin.sizes.is_empty());
        assert!((pin.rating - 5.0).abs() < f64::EPSILON);
        assert!(seed.tours.is_empty());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = parse(
            r"
photos:
  - src: /a.png
    alt: a
    title: A
    location: Londres
    caption: extra
",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let seed = parse(
            r"
tours:
  - title: ''
    destination: Londres
    dates: 1-2 Marzo
    price: '-1'
products:
  - name: Remera
    price: '20'
    original_price: '10'
    category: Remeras
    rating: 7
    sizes: [M, M, '']
",
        )
        .unwrap();

        let errors = validate(&seed);
        assert!(errors.contains(&"tours[0]: title is empty".to_owned()));
        assert!(errors.contains(&"tours[0]: price is negative".to_owned()));
        assert!(errors.iter().any(|e| e.ends_with("original_price is below price")));
        assert!(errors.iter().any(|e| e.ends_with("rating must be between 0 and 5")));
        assert!(errors.iter().any(|e| e.ends_with("size M is listed twice")));
        assert!(errors.iter().any(|e| e.ends_with("sizes[2] is empty")));
        assert_eq!(errors.len(), 6);
    }
}
