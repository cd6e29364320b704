// Storefront routes: product browsing and the cart.
use crate::api::Method;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, set_cookie, test_app, MockTransport};
use serde_json::json;
use std::sync::Arc;

#[test]
fn home_lists_products_with_pager() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Products/paged",
        200,
        json!({
            "items": [
                {"id": "p1", "name": "Air Max", "price": 2_500_000, "quantity": 10},
                {"id": "p2", "name": "Classic Leather", "price": 1_800_000, "quantity": 3}
            ],
            "totalPages": 3
        }),
    ));
    let app = test_app(mock.clone());

    let resp = handle(get("/", None), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Air Max"));
    assert!(body.contains("Classic Leather"));
    assert!(body.contains("page=2"), "pager should link to the next page");

    let query = &mock.calls()[0].query;
    assert!(query.contains(&("currentPage".to_string(), "1".to_string())));
    assert!(query.contains(&("pageSize".to_string(), "12".to_string())));
}

#[test]
fn home_search_forwards_keyword() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Products/paged",
        200,
        json!({"items": [], "totalPages": 0}),
    ));
    let app = test_app(mock.clone());

    let resp = handle(get("/?q=runner", None), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("No products found."));

    let query = &mock.calls()[0].query;
    assert!(query.contains(&("keyword".to_string(), "runner".to_string())));
}

#[test]
fn home_stays_up_when_backend_is_down() {
    // No routes configured: every backend call fails.
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/", None), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Could not load products"));
}

#[test]
fn unknown_product_is_a_404() {
    let app = test_app(Arc::new(MockTransport::new()));

    let result = handle(get("/products/nope", None), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn empty_cart_shows_message_and_no_checkout() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/cart", None), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Your cart is empty."));
    assert!(!body.contains("href=\"/checkout\""));
}

#[test]
fn cart_shows_subtotal_and_checkout_when_stock_suffices() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Carts",
        200,
        json!([
            {"id": "l1", "productId": "p1", "name": "Air Max",
             "price": 100_000, "quantity": 1, "quantityAvailable": 5},
            {"id": "l2", "productId": "p2", "name": "Classic Leather",
             "price": 100_000, "quantity": 1, "quantityAvailable": 5}
        ]),
    ));
    let app = test_app(mock);

    let resp = handle(get("/cart", Some("cart_id=c1")), &app).unwrap();
    let body = body_string(resp);

    assert!(body.contains("200000"), "subtotal of the two lines");
    assert!(body.contains("href=\"/checkout\""));
}

#[test]
fn overstocked_line_blocks_checkout() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Carts",
        200,
        json!([
            {"id": "l1", "productId": "p1", "name": "Air Max",
             "price": 100_000, "quantity": 5, "quantityAvailable": 2}
        ]),
    ));
    let app = test_app(mock);

    let resp = handle(get("/cart", Some("cart_id=c1")), &app).unwrap();
    let body = body_string(resp);

    assert!(body.contains("Only 2 left in stock"));
    assert!(!body.contains("href=\"/checkout\""));
}

#[test]
fn first_cart_add_mints_the_cart_cookie() {
    let mock = Arc::new(MockTransport::new().on(Method::Post, "/Carts", 200, json!({})));
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/cart/add", "productId=p1&quantity=2", None),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/cart?flash=Added+to+cart.");
    assert!(set_cookie(&resp).starts_with("cart_id="));

    match &mock.calls()[0].body {
        crate::api::ApiBody::Json(value) => {
            assert_eq!(value["productId"], "p1");
            assert_eq!(value["quantity"], 2);
        }
        other => panic!("expected JSON body, got {other:?}"),
    }
}

#[test]
fn cart_add_reuses_an_existing_cart_cookie() {
    let mock = Arc::new(MockTransport::new().on(Method::Post, "/Carts", 200, json!({})));
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/cart/add", "productId=p1&quantity=1", Some("cart_id=c9")),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert!(set_cookie(&resp).is_empty(), "no new cookie for a known cart");

    match &mock.calls()[0].body {
        crate::api::ApiBody::Json(value) => assert_eq!(value["cartId"], "c9"),
        other => panic!("expected JSON body, got {other:?}"),
    }
}
