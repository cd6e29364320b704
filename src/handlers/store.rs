// src/handlers/store.rs
//
// Storefront: product browsing, cart, checkout with the tri-state
// payment dispatch, order confirmation.
use crate::api::models::{CartLine, Invoice, Paged, PaymentInitiation, Product};
use crate::api::{ApiError, ApiRequest, Method};
use crate::app::App;
use crate::auth::portal::{self, Portal};
use crate::domain::address::AddressSelector;
use crate::domain::cart::{self, PaymentMethod};
use crate::domain::validate::{check_field, FieldKind};
use crate::errors::{ResultResp, ServerError};
use crate::forms::{parse_query, parse_submission};
use crate::handlers::{flash_from, keyword_from, page_from, with_flash};
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::templates::pages::store_cart::{cart_page, CartVm};
use crate::templates::pages::store_checkout::{checkout_page, CheckoutVm};
use crate::templates::pages::store_confirmation::{confirmation_page, ConfirmationVm};
use crate::templates::pages::store_home::{home_page, HomeVm};
use crate::templates::pages::store_product::{product_page, ProductVm};
use astra::Request;
use serde_json::json;
use std::collections::BTreeMap;

const STORE_PAGE_SIZE: u32 = 12;

fn logged_in(req: &Request) -> bool {
    portal::portal_token(req, Portal::Customer).is_some()
}

pub fn home(req: &Request, app: &App) -> ResultResp {
    let query = parse_query(req);
    let page = page_from(&query);
    let keyword = keyword_from(&query);

    let mut api_req = ApiRequest::new(Method::Get, "/Products/paged")
        .query("currentPage", page.to_string())
        .query("pageSize", STORE_PAGE_SIZE.to_string());
    if !keyword.trim().is_empty() {
        api_req = api_req.query("keyword", keyword.trim());
    }

    // A transport failure must not take the page down; show the notice
    // banner over an empty grid instead.
    let (products, total_pages, flash) = match app.api.get_json::<Paged<Product>>(&api_req) {
        Ok(paged) => (paged.items, paged.total_pages, flash_from(req)),
        Err(err) => {
            eprintln!("product list fetch failed: {err}");
            (Vec::new(), 0, Some("Could not load products. Please try again.".to_string()))
        }
    };

    html_response(home_page(&HomeVm {
        products,
        current_page: page,
        total_pages,
        keyword,
        logged_in: logged_in(req),
        flash,
    }))
}

pub fn product_detail(req: &Request, app: &App, id: &str) -> ResultResp {
    let api_req = ApiRequest::new(Method::Get, format!("/Products/{id}"));
    let product: Product = match app.api.get_json(&api_req) {
        Ok(p) => p,
        Err(ApiError::Status { status: 404, .. }) => return Err(ServerError::NotFound),
        Err(err) => return Err(err.into()),
    };

    html_response(product_page(&ProductVm {
        product,
        logged_in: logged_in(req),
        flash: flash_from(req),
    }))
}

fn cart_lines(app: &App, cart_id: &str) -> Result<Vec<CartLine>, ApiError> {
    let req = ApiRequest::new(Method::Get, "/Carts").query("cartId", cart_id);
    app.api.get_json(&req)
}

pub fn cart_view(req: &Request, app: &App) -> ResultResp {
    let lines = match portal::cookie_value(req, portal::CART_COOKIE) {
        Some(cart_id) => cart_lines(app, &cart_id)?,
        None => Vec::new(),
    };

    html_response(cart_page(&CartVm {
        subtotal: cart::subtotal(&lines),
        can_checkout: cart::can_proceed_to_checkout(&lines),
        lines,
        logged_in: logged_in(req),
        flash: flash_from(req),
    }))
}

pub fn cart_add(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_submission(req)?;
    let product_id = form.get("productId").to_string();
    if product_id.is_empty() {
        return Err(ServerError::BadRequest("productId missing".to_string()));
    }
    let quantity: i64 = form.get("quantity").parse().unwrap_or(1).max(1);

    let (cart_id, minted) = match portal::cookie_value(req, portal::CART_COOKIE) {
        Some(id) => (id, false),
        None => (portal::generate_cart_token(), true),
    };

    let api_req = ApiRequest::new(Method::Post, "/Carts").json(json!({
        "cartId": cart_id,
        "productId": product_id,
        "quantity": quantity,
    }));

    if let Err(err) = app.api.send(&api_req) {
        eprintln!("cart add failed: {err}");
        return redirect(&with_flash("/cart", "Could not add the item to your cart."));
    }

    let target = with_flash("/cart", "Added to cart.");
    if minted {
        redirect_with_cookie(&target, &portal::cart_cookie(&cart_id))
    } else {
        redirect(&target)
    }
}

pub fn cart_update(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_submission(req)?;
    let line_id = form.get("lineId").to_string();
    let quantity: i64 = form.get("quantity").parse().unwrap_or(1).max(1);

    let api_req = ApiRequest::new(Method::Put, format!("/Carts/{line_id}"))
        .json(json!({ "quantity": quantity }));
    if let Err(err) = app.api.send(&api_req) {
        eprintln!("cart update failed: {err}");
        return redirect(&with_flash("/cart", "Could not update the cart."));
    }
    redirect("/cart")
}

pub fn cart_remove(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_submission(req)?;
    let line_id = form.get("lineId").to_string();

    let api_req = ApiRequest::new(Method::Delete, format!("/Carts/{line_id}"));
    if let Err(err) = app.api.send(&api_req) {
        eprintln!("cart remove failed: {err}");
        return redirect(&with_flash("/cart", "Could not remove the item."));
    }
    redirect("/cart")
}

/// Shared entry gate for GET /checkout and the place-order POST: same
/// eligibility predicate, enforced in one place.
fn checkout_cart(req: &Request, app: &App) -> Result<(String, Vec<CartLine>), ResultResp> {
    let Some(cart_id) = portal::cookie_value(req, portal::CART_COOKIE) else {
        return Err(redirect("/cart"));
    };
    let lines = match cart_lines(app, &cart_id) {
        Ok(lines) => lines,
        Err(err) => return Err(Err(err.into())),
    };
    if lines.is_empty() {
        return Err(redirect("/cart"));
    }
    if !cart::can_proceed_to_checkout(&lines) {
        return Err(redirect(&with_flash(
            "/cart",
            "Some items exceed available stock.",
        )));
    }
    Ok((cart_id, lines))
}

pub fn checkout_view(req: &Request, app: &App) -> ResultResp {
    let Some(token) = portal::portal_token(req, Portal::Customer) else {
        return redirect(Portal::Customer.login_route());
    };
    let (_, lines) = match checkout_cart(req, app) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };

    // Prefill the cascade and phone from the saved profile.
    let profile_req =
        ApiRequest::new(Method::Get, "/Users/Customer/profile").bearer(Some(token));
    let (seed, phone) = match app
        .api
        .get_json::<crate::api::models::CustomerProfile>(&profile_req)
    {
        Ok(profile) => (profile.address.unwrap_or_default(), profile.phone_number),
        Err(_) => (String::new(), String::new()),
    };

    let selector = AddressSelector::from_seed(&app.regions, &seed);
    html_response(checkout_page(&CheckoutVm {
        subtotal: cart::subtotal(&lines),
        grand_total: cart::grand_total(&lines),
        lines: &lines,
        selector: &selector,
        phone,
        note: String::new(),
        payment: "cod".to_string(),
        errors: BTreeMap::new(),
        flash: flash_from(req),
    }))
}

pub fn checkout_submit(req: &mut Request, app: &App) -> ResultResp {
    let Some(token) = portal::portal_token(req, Portal::Customer) else {
        return redirect(Portal::Customer.login_route());
    };
    let form = parse_submission(req)?;
    let (cart_id, lines) = match checkout_cart(req, app) {
        Ok(ok) => ok,
        Err(resp) => return resp,
    };

    let mut selector = AddressSelector::new(&app.regions);
    selector.select_city(form.get("city"));
    selector.select_district(form.get("district"));
    selector.select_ward(form.get("ward"));

    let phone = form.get("phone").to_string();
    let note = form.get("note").to_string();
    let payment = form.get("payment").to_string();

    let render = |selector: &AddressSelector, errors: BTreeMap<String, String>| {
        html_response(checkout_page(&CheckoutVm {
            subtotal: cart::subtotal(&lines),
            grand_total: cart::grand_total(&lines),
            lines: &lines,
            selector,
            phone: phone.clone(),
            note: note.clone(),
            payment: payment.clone(),
            errors,
            flash: None,
        }))
    };

    // A cascade change resubmits without the save marker; just rebuild
    // the option lists.
    if form.get("save").is_empty() {
        return render(&selector, BTreeMap::new());
    }

    let mut errors: BTreeMap<String, String> = selector
        .submit_errors()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    if let Some(message) = check_field("Phone Number", FieldKind::Phone, true, &phone) {
        errors.insert("phone".to_string(), message);
    }
    let method = PaymentMethod::from_form(&payment);
    if method.is_none() {
        errors.insert("payment".to_string(), "Choose a payment method".to_string());
    }
    if !errors.is_empty() {
        return render(&selector, errors);
    }
    let method = method.unwrap_or(PaymentMethod::Cod);

    if method.creates_order_first() {
        // COD and Momo: the order exists before any payment happens.
        let api_req = ApiRequest::new(Method::Post, "/Invoices")
            .bearer(Some(token))
            .json(json!({
                "cartId": cart_id,
                "address": selector.address(),
                "phoneNumber": phone,
                "note": note,
                "paymentMethod": method.as_str(),
            }));
        let invoice: Invoice = match app.api.get_json(&api_req) {
            Ok(invoice) => invoice,
            Err(err) => {
                eprintln!("order creation failed: {err}");
                let mut errors = BTreeMap::new();
                errors.insert(
                    "payment".to_string(),
                    "Could not place the order. Please try again.".to_string(),
                );
                return render(&selector, errors);
            }
        };
        // Cart is spent; drop its cookie on the way to confirmation.
        return redirect_with_cookie(
            &format!("/orders/{}", invoice.id),
            &format!("{}=; Path=/; Max-Age=0", portal::CART_COOKIE),
        );
    }

    // VnPay: payment first, the order is only created after off-site
    // confirmation. Full-page redirect to the gateway.
    let api_req = ApiRequest::new(Method::Post, "/Payments/vnpay")
        .bearer(Some(token))
        .json(json!({
            "cartId": cart_id,
            "address": selector.address(),
            "phoneNumber": phone,
            "note": note,
        }));
    match app.api.get_json::<PaymentInitiation>(&api_req) {
        Ok(initiation) => redirect(&initiation.pay_url),
        Err(err) => {
            eprintln!("payment initiation failed: {err}");
            let mut errors = BTreeMap::new();
            errors.insert(
                "payment".to_string(),
                "Could not reach the payment gateway. Please try again.".to_string(),
            );
            render(&selector, errors)
        }
    }
}

pub fn order_view(req: &Request, app: &App, id: &str) -> ResultResp {
    let Some(token) = portal::portal_token(req, Portal::Customer) else {
        return redirect(Portal::Customer.login_route());
    };

    let api_req =
        ApiRequest::new(Method::Get, format!("/Invoices/{id}")).bearer(Some(token));
    let invoice: Invoice = match app.api.get_json(&api_req) {
        Ok(invoice) => invoice,
        Err(ApiError::Status { status: 404, .. }) => return Err(ServerError::NotFound),
        Err(err) => return Err(err.into()),
    };

    html_response(confirmation_page(&ConfirmationVm {
        invoice,
        logged_in: true,
    }))
}
