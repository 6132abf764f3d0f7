//! Session cart over the HTMX endpoints.

use locura_integration_tests::TestContext;
use reqwest::StatusCode;
use rust_decimal::Decimal;

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_new_session_has_empty_cart() {
    let ctx = TestContext::new().unwrap();

    let cart = ctx.cart().await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.item_count, 0);
    assert_eq!(cart.total, Decimal::ZERO);

    let count = ctx.client.get(ctx.url("/cart/count")).send().await.unwrap();
    assert_eq!(count.text().await.unwrap().trim(), "0");
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_add_twice_consolidates_line() {
    let ctx = TestContext::new().unwrap();
    let (product, size) = ctx.purchasable_product().await.unwrap().unwrap();

    let resp = ctx.add_to_cart(product.id, size.as_deref(), 1).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    assert_eq!(resp.text().await.unwrap().trim(), "1");

    let resp = ctx.add_to_cart(product.id, size.as_deref(), 2).await.unwrap();
    assert_eq!(resp.text().await.unwrap().trim(), "3");

    let cart = ctx.cart().await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.items[0].size, size);
    assert_eq!(cart.items[0].name, product.name);
    assert_eq!(cart.item_count, 3);
    assert_eq!(cart.total, product.price * Decimal::from(3));
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_update_to_zero_removes_line() {
    let ctx = TestContext::new().unwrap();
    let (product, size) = ctx.purchasable_product().await.unwrap().unwrap();
    ctx.add_to_cart(product.id, size.as_deref(), 2).await.unwrap();

    let line_id = ctx.cart().await.unwrap().items[0].id.clone();
    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .form(&[("line_id", line_id.as_str()), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let cart = ctx.cart().await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total, Decimal::ZERO);
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_remove_unknown_line_keeps_cart() {
    let ctx = TestContext::new().unwrap();
    let (product, size) = ctx.purchasable_product().await.unwrap().unwrap();
    ctx.add_to_cart(product.id, size.as_deref(), 1).await.unwrap();

    let resp = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .form(&[("line_id", "999999-XXL")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.cart().await.unwrap().item_count, 1);
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_clear_empties_cart() {
    let ctx = TestContext::new().unwrap();
    let (product, size) = ctx.purchasable_product().await.unwrap().unwrap();
    ctx.add_to_cart(product.id, size.as_deref(), 4).await.unwrap();

    ctx.client.post(ctx.url("/cart/clear")).send().await.unwrap();

    assert_eq!(ctx.cart().await.unwrap().item_count, 0);
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_sized_product_without_size_is_rejected() {
    let ctx = TestContext::new().unwrap();
    let products = ctx.products().await.unwrap();
    let Some(sized) = products.iter().find(|p| p.in_stock && !p.sizes.is_empty()) else {
        return;
    };

    let resp = ctx.add_to_cart(sized.id, None, 1).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.cart().await.unwrap().item_count, 0);
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_carts_are_per_session() {
    let alice = TestContext::new().unwrap();
    let bob = TestContext::new().unwrap();
    let (product, size) = alice.purchasable_product().await.unwrap().unwrap();

    alice.add_to_cart(product.id, size.as_deref(), 1).await.unwrap();

    assert_eq!(alice.cart().await.unwrap().item_count, 1);
    assert_eq!(bob.cart().await.unwrap().item_count, 0);
}
