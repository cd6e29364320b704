// Checkout flow: eligibility gates, the address cascade, and the
// payment dispatch split.
use crate::api::{ApiBody, Method};
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, set_cookie, test_app, MockTransport};
use serde_json::json;
use std::sync::Arc;

const CUSTOMER: &str = "cart_id=c1; customer_token=tok";

fn cart_route() -> (Method, &'static str, u16, serde_json::Value) {
    (
        Method::Get,
        "/Carts",
        200,
        json!([
            {"id": "l1", "productId": "p1", "name": "Air Max",
             "price": 100_000, "quantity": 2, "quantityAvailable": 5}
        ]),
    )
}

fn mock_with_cart() -> MockTransport {
    let (method, path, status, body) = cart_route();
    MockTransport::new().on(method, path, status, body)
}

#[test]
fn checkout_requires_customer_login() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/checkout", Some("cart_id=c1")), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/login");
}

#[test]
fn checkout_without_a_cart_goes_back_to_cart() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/checkout", Some("customer_token=tok")), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/cart");
}

#[test]
fn overstocked_cart_is_bounced_from_checkout() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Carts",
        200,
        json!([
            {"id": "l1", "productId": "p1", "name": "Air Max",
             "price": 100_000, "quantity": 9, "quantityAvailable": 2}
        ]),
    ));
    let app = test_app(mock);

    let resp = handle(get("/checkout", Some(CUSTOMER)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert!(location(&resp).starts_with("/cart?flash="));
}

#[test]
fn checkout_shows_shipping_and_grand_total() {
    let mock = Arc::new(mock_with_cart());
    let app = test_app(mock);

    let resp = handle(get("/checkout", Some(CUSTOMER)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("15000"), "flat shipping fee");
    assert!(body.contains("215000"), "subtotal 200000 plus shipping");
}

#[test]
fn cascade_change_rerenders_without_placing_an_order() {
    let mock = Arc::new(mock_with_cart());
    let app = test_app(mock.clone());

    // No save marker: the city changed and the form resubmitted itself.
    let resp = handle(
        post_form("/checkout", "city=Hanoi&district=&ward=&phone=&payment=cod", Some(CUSTOMER)),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("BaDinh"), "district options for the chosen city");
    assert!(
        !mock.calls().iter().any(|c| c.path == "/Invoices"),
        "a cascade reload must never create an order"
    );
}

#[test]
fn invalid_phone_blocks_the_order_before_the_network() {
    let mock = Arc::new(mock_with_cart());
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/checkout",
            "city=Hanoi&district=BaDinh&ward=PhucXa&phone=123&payment=cod&save=1",
            Some(CUSTOMER),
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Phone Number must be 10 digits"));
    assert!(!mock.calls().iter().any(|c| c.path == "/Invoices"));
}

#[test]
fn cod_order_is_created_and_cart_cookie_dropped() {
    let (method, path, status, body) = cart_route();
    let mock = Arc::new(
        MockTransport::new().on(method, path, status, body).on(
            Method::Post,
            "/Invoices",
            201,
            json!({
                "id": "inv1", "total": 215_000, "shippingFee": 15_000,
                "paymentMethod": "cod", "address": "PhucXa, BaDinh, Hanoi",
                "phoneNumber": "0912345678"
            }),
        ),
    );
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/checkout",
            "city=Hanoi&district=BaDinh&ward=PhucXa&phone=0912345678&note=&payment=cod&save=1",
            Some(CUSTOMER),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/orders/inv1");
    assert!(set_cookie(&resp).starts_with("cart_id=;"), "cart is spent");

    let call = mock
        .calls()
        .into_iter()
        .find(|c| c.path == "/Invoices")
        .expect("order creation call");
    match &call.body {
        ApiBody::Json(value) => {
            assert_eq!(value["cartId"], "c1");
            assert_eq!(value["address"], "PhucXa, BaDinh, Hanoi");
            assert_eq!(value["paymentMethod"], "cod");
        }
        other => panic!("expected JSON body, got {other:?}"),
    }
}

#[test]
fn vnpay_redirects_to_the_gateway_without_an_order() {
    let (method, path, status, body) = cart_route();
    let mock = Arc::new(
        MockTransport::new().on(method, path, status, body).on(
            Method::Post,
            "/Payments/vnpay",
            200,
            json!({"payUrl": "https://pay.example/session/abc"}),
        ),
    );
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/checkout",
            "city=Hanoi&district=BaDinh&ward=PhucXa&phone=0912345678&note=&payment=vnpay&save=1",
            Some(CUSTOMER),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "https://pay.example/session/abc");
    // The cart cookie survives until the gateway confirms.
    assert!(set_cookie(&resp).is_empty());
    assert!(!mock.calls().iter().any(|c| c.path == "/Invoices"));
}

#[test]
fn order_confirmation_renders_the_invoice() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Invoices/inv1",
        200,
        json!({
            "id": "inv1", "total": 215_000, "shippingFee": 15_000,
            "paymentMethod": "cod", "address": "PhucXa, BaDinh, Hanoi",
            "phoneNumber": "0912345678",
            "lines": [{"name": "Air Max", "price": 100_000, "quantity": 2}]
        }),
    ));
    let app = test_app(mock.clone());

    let resp = handle(get("/orders/inv1", Some("customer_token=tok")), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Thank you for your order!"));
    assert!(body.contains("Air Max"));
    assert_eq!(mock.calls()[0].bearer.as_deref(), Some("tok"));
}
