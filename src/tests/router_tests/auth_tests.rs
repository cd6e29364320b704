// Login, logout and registration for both portals.
use crate::api::Method;
use crate::router::handle;
use crate::tests::utils::{body_string, location, post_form, set_cookie, test_app, MockTransport};
use serde_json::json;
use std::sync::Arc;

#[test]
fn customer_login_sets_the_customer_cookie() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Post,
        "/Users/Customer/login",
        200,
        json!({"token": "tok123"}),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form("/login", "userName=an.nguyen&password=secret", None),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert!(set_cookie(&resp).starts_with("customer_token=tok123"));
}

#[test]
fn employee_login_sets_the_employee_cookie() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Post,
        "/Users/Employee/login",
        200,
        json!({"token": "emp456"}),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form("/admin/login", "userName=boss&password=secret", None),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin");
    assert!(set_cookie(&resp).starts_with("employee_token=emp456"));
}

#[test]
fn wrong_credentials_rerender_with_a_message() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Post,
        "/Users/Customer/login",
        401,
        json!({}),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form("/login", "userName=an.nguyen&password=nope", None),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Invalid user name or password"));
    assert!(body.contains("an.nguyen"), "the typed user name is kept");
}

#[test]
fn empty_credentials_never_reach_the_backend() {
    let mock = Arc::new(MockTransport::new());
    let app = test_app(mock.clone());

    let resp = handle(post_form("/login", "userName=&password=", None), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("User name and password are required"));
    assert_eq!(mock.calls().len(), 0);
}

#[test]
fn logout_clears_only_the_customer_cookie() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(post_form("/logout", "", None), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/");
    assert!(set_cookie(&resp).starts_with("customer_token=;"));
}

#[test]
fn registration_with_a_bad_email_makes_no_network_call() {
    let mock = Arc::new(MockTransport::new());
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/register",
            "fullName=An&userName=an&phoneNumber=0912345678&email=bad&password=secret",
            None,
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Email is not a valid email address"));
    assert_eq!(mock.calls().len(), 0);
}

#[test]
fn registration_conflict_lands_on_the_owning_field() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Post,
        "/Users/Customer/register",
        409,
        json!(["DuplicateUserName"]),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form(
            "/register",
            "fullName=An&userName=an&phoneNumber=0912345678&email=an@example.com&password=secret",
            None,
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("User Name already exists"));
}

#[test]
fn successful_registration_redirects_to_login() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Post,
        "/Users/Customer/register",
        201,
        json!({}),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form(
            "/register",
            "fullName=An&userName=an&phoneNumber=0912345678&email=an@example.com&password=secret",
            None,
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).starts_with("/login?flash="));
}

#[test]
fn profile_update_rotates_the_token_cookie() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Put,
        "/Users/Customer/profile",
        200,
        json!({"token": "rotated789"}),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form(
            "/account",
            "fullName=An&phoneNumber=0912345678&email=an@example.com\
             &city=Hanoi&district=BaDinh&ward=PhucXa&save=1",
            Some("customer_token=old"),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert!(location(&resp).starts_with("/account?flash="));
    assert!(set_cookie(&resp).starts_with("customer_token=rotated789"));
}

#[test]
fn unmappable_profile_conflict_still_reports_failure() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Put,
        "/Users/Customer/profile",
        409,
        json!(["SomethingElse"]),
    ));
    let app = test_app(mock);

    let resp = handle(
        post_form(
            "/account",
            "fullName=An&phoneNumber=0912345678&email=an@example.com\
             &city=Hanoi&district=BaDinh&ward=PhucXa&save=1",
            Some("customer_token=tok"),
        ),
        &app,
    )
    .unwrap();

    // A conflict token we cannot map to a field must still tell the
    // customer something went wrong.
    assert_eq!(resp.status(), 302);
    assert_eq!(
        location(&resp),
        "/account?flash=Could+not+save+your+profile."
    );
}
