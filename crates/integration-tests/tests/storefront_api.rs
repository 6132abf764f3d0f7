//! JSON catalog API.

use locura_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::Value;

async fn get_json(ctx: &TestContext, path: &str) -> (StatusCode, Value) {
    let resp = ctx.client.get(ctx.url(path)).send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_products_hide_internal_fields() {
    let ctx = TestContext::new().unwrap();

    let (status, body) = get_json(&ctx, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    for product in body.as_array().unwrap() {
        assert!(product.get("cost_price").is_none());
        assert!(product.get("image_public_id").is_none());
    }
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_categories_start_with_todos() {
    let ctx = TestContext::new().unwrap();

    let (_, body) = get_json(&ctx, "/api/products/categories").await;
    assert_eq!(body[0], "Todos");
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_category_filter() {
    let ctx = TestContext::new().unwrap();
    let products = ctx.products().await.unwrap();
    let Some(first) = products.first() else {
        return;
    };

    let filtered = ctx
        .client
        .get(ctx.url("/api/products"))
        .query(&[("category", first.category.as_str())])
        .send()
        .await
        .unwrap()
        .json::<Vec<Value>>()
        .await
        .unwrap();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|p| p["category"] == first.category.as_str()));
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::new().unwrap();

    let (status, _) = get_json(&ctx, "/api/products/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_tour_filters_match_tours() {
    let ctx = TestContext::new().unwrap();

    let (_, tours) = get_json(&ctx, "/api/tours").await;
    let (_, filters) = get_json(&ctx, "/api/tours/filters").await;

    let destinations = filters["destinations"].as_array().unwrap();
    for tour in tours.as_array().unwrap() {
        assert!(destinations.contains(&tour["destination"]));
    }
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_gallery_endpoints() {
    let ctx = TestContext::new().unwrap();

    let (status, photos) = get_json(&ctx, "/api/photos").await;
    assert_eq!(status, StatusCode::OK);
    assert!(photos.is_array());

    let (status, albums) = get_json(&ctx, "/api/albums").await;
    assert_eq!(status, StatusCode::OK);
    assert!(albums.is_array());
}
