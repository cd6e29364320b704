// Back-office routes through the generic resource controller.
use crate::api::Method;
use crate::router::handle;
use crate::tests::utils::{body_string, get, location, post_form, test_app, MockTransport};
use serde_json::json;
use std::sync::Arc;

const EMPLOYEE: &str = "employee_token=emp";

#[test]
fn admin_routes_require_the_employee_cookie() {
    let app = test_app(Arc::new(MockTransport::new()));

    for path in ["/admin", "/admin/brands", "/admin/brands/new", "/admin/brands/export"] {
        let resp = handle(get(path, None), &app).unwrap();
        assert_eq!(resp.status(), 302, "{path}");
        assert_eq!(location(&resp), "/admin/login", "{path}");
    }
}

#[test]
fn customer_cookie_does_not_open_the_back_office() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/admin/brands", Some("customer_token=tok")), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/login");
}

#[test]
fn admin_root_redirects_to_the_first_resource() {
    let app = test_app(Arc::new(MockTransport::new()));

    let resp = handle(get("/admin", Some(EMPLOYEE)), &app).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/brands");
}

#[test]
fn list_renders_rows_and_forwards_the_token() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Brands/paged",
        200,
        json!({"items": [{"id": "b1", "name": "Nike"}], "totalPages": 1}),
    ));
    let app = test_app(mock.clone());

    let resp = handle(get("/admin/brands?page=1", Some(EMPLOYEE)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Brand Management"));
    assert!(body.contains("Nike"));
    assert!(body.contains("/admin/brands/b1/edit"));

    assert_eq!(mock.calls()[0].bearer.as_deref(), Some("emp"));
}

#[test]
fn unknown_resource_key_is_a_404() {
    let app = test_app(Arc::new(MockTransport::new()));

    let result = handle(get("/admin/unicorns", Some(EMPLOYEE)), &app);
    assert!(result.is_err());
}

#[test]
fn create_with_an_empty_name_rerenders_and_stays_offline() {
    let mock = Arc::new(MockTransport::new());
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/admin/brands/save", "save=1&name=", Some(EMPLOYEE)),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Name must not be empty"));
    assert_eq!(mock.calls().len(), 0);
}

#[test]
fn create_posts_and_redirects_with_a_notice() {
    let mock = Arc::new(MockTransport::new().on(Method::Post, "/Brands", 201, json!({})));
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/admin/brands/save", "save=1&name=Nike", Some(EMPLOYEE)),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/brands?flash=Brand+saved.");
    assert_eq!(mock.calls()[0].method, Method::Post);
}

#[test]
fn edit_loads_the_entity_and_puts_back_to_it() {
    let mock = Arc::new(
        MockTransport::new()
            .on(Method::Get, "/Brands/b1", 200, json!({"id": "b1", "name": "Nike"}))
            .on(Method::Put, "/Brands/b1", 204, json!({})),
    );
    let app = test_app(mock.clone());

    let resp = handle(get("/admin/brands/b1/edit", Some(EMPLOYEE)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Nike"));

    let resp = handle(
        post_form("/admin/brands/save", "save=1&id=b1&name=Adidas", Some(EMPLOYEE)),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);

    let put = mock.calls().into_iter().find(|c| c.method == Method::Put);
    assert_eq!(put.unwrap().path, "/Brands/b1");
}

#[test]
fn employee_edit_with_a_blank_password_still_saves() {
    let mock = Arc::new(MockTransport::new().on(Method::Put, "/Employees/e1", 204, json!({})));
    let app = test_app(mock.clone());

    // The stored password stays server-side; leaving the field empty on
    // an edit must not block the save.
    let resp = handle(
        post_form(
            "/admin/employees/save",
            "save=1&id=e1&fullName=Nguyen+Van+An&userName=an.nguyen&password=\
             &phoneNumber=0912345678&email=an@example.com\
             &city=Hanoi&district=BaDinh&ward=PhucXa",
            Some(EMPLOYEE),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302, "blank password must not block the edit");
    assert_eq!(location(&resp), "/admin/employees?flash=Employee+saved.");
    assert_eq!(mock.calls()[0].path, "/Employees/e1");
}

#[test]
fn employee_create_still_requires_a_password() {
    let mock = Arc::new(MockTransport::new());
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/admin/employees/save",
            "save=1&fullName=Nguyen+Van+An&userName=an.nguyen&password=\
             &phoneNumber=0912345678&email=an@example.com\
             &city=Hanoi&district=BaDinh&ward=PhucXa",
            Some(EMPLOYEE),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Password must not be empty"));
    assert_eq!(mock.calls().len(), 0);
}

#[test]
fn supplier_save_without_a_cascade_selection_lists_each_level() {
    let mock = Arc::new(MockTransport::new());
    let app = test_app(mock.clone());

    let resp = handle(
        post_form(
            "/admin/suppliers/save",
            "save=1&name=Acme&phoneNumber=0912345678&email=a@b.com&city=&district=&ward=",
            Some(EMPLOYEE),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("City must not be empty"));
    assert!(body.contains("District must not be empty"));
    assert!(body.contains("Ward must not be empty"));
    assert_eq!(mock.calls().len(), 0);
}

#[test]
fn supplier_cascade_reload_fills_district_options() {
    let app = test_app(Arc::new(MockTransport::new()));

    // City picked, no save marker: the form resubmitted itself.
    let resp = handle(
        post_form(
            "/admin/suppliers/save",
            "name=Acme&phoneNumber=&email=&city=Hanoi&district=&ward=",
            Some(EMPLOYEE),
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("BaDinh"));
    assert!(body.contains("HoanKiem"));
}

#[test]
fn delete_confirmation_names_the_entity() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Brands/b1",
        200,
        json!({"id": "b1", "name": "Nike"}),
    ));
    let app = test_app(mock);

    let resp = handle(get("/admin/brands/b1/delete", Some(EMPLOYEE)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Are you sure"));
    assert!(body.contains("Nike"));
    assert!(body.contains("deactivated"), "soft delete wording");
}

#[test]
fn soft_delete_hits_the_softdelete_endpoint() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Put,
        "/Brands/SoftDelete/b1",
        204,
        json!({}),
    ));
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/admin/brands/b1/delete", "", Some(EMPLOYEE)),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin/brands?flash=Brand+deleted.");
    assert_eq!(mock.calls()[0].path, "/Brands/SoftDelete/b1");
}

#[test]
fn product_delete_is_hard() {
    let mock = Arc::new(MockTransport::new().on(Method::Delete, "/Products/p1", 204, json!({})));
    let app = test_app(mock.clone());

    let resp = handle(
        post_form("/admin/products/p1/delete", "", Some(EMPLOYEE)),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(mock.calls()[0].method, Method::Delete);
}

#[test]
fn export_streams_a_workbook() {
    let mock = Arc::new(MockTransport::new().on(
        Method::Get,
        "/Brands",
        200,
        json!([{"id": "b1", "name": "Nike"}, {"id": "b2", "name": "Adidas"}]),
    ));
    let app = test_app(mock);

    let resp = handle(get("/admin/brands/export", Some(EMPLOYEE)), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.contains("brands.xlsx"));
}
