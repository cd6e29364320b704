// src/handlers/auth.rs
//
// Login/logout for both portals, customer registration, and the
// account page with profile edit. Each portal keeps its own token
// cookie; losing one never affects the other.
use crate::api::models::{Invoice, LoginResponse};
use crate::api::{ApiError, ApiRequest, Method};
use crate::app::App;
use crate::auth::portal::{self, Portal};
use crate::domain::address::AddressSelector;
use crate::domain::validate::{check_field, FieldKind};
use crate::errors::ResultResp;
use crate::forms::{parse_submission, ParsedForm};
use crate::handlers::{flash_from, with_flash};
use crate::responses::{html_response, redirect, redirect_with_cookie};
use crate::templates::pages::admin_login::{admin_login_page, AdminLoginVm};
use crate::templates::pages::store_account::{account_page, AccountVm};
use crate::templates::pages::store_login::{login_page, register_page, LoginVm, RegisterVm};
use astra::Request;
use serde_json::json;
use std::collections::BTreeMap;

/// Registration / profile fields share the admin validation rules.
const PROFILE_FIELDS: &[(&str, &str, FieldKind)] = &[
    ("fullName", "Full Name", FieldKind::PersonName),
    ("phoneNumber", "Phone Number", FieldKind::Phone),
    ("email", "Email", FieldKind::Email),
];

fn conflict_errors(tokens: &[String]) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for token in tokens {
        if token.contains("PhoneNumber") {
            errors.insert(
                "phoneNumber".to_string(),
                "Phone Number already exists".to_string(),
            );
        } else if token.contains("Email") {
            errors.insert("email".to_string(), "Email already exists".to_string());
        } else if token.contains("DuplicateUserName") {
            errors.insert(
                "userName".to_string(),
                "User Name already exists".to_string(),
            );
        }
    }
    errors
}

pub fn login_view(req: &Request) -> ResultResp {
    html_response(login_page(&LoginVm {
        user_name: String::new(),
        error: None,
        flash: flash_from(req),
    }))
}

pub fn login_submit(req: &mut Request, app: &App) -> ResultResp {
    portal_login(req, app, Portal::Customer)
}

pub fn admin_login_view(req: &Request) -> ResultResp {
    html_response(admin_login_page(&AdminLoginVm {
        user_name: String::new(),
        error: None,
        flash: flash_from(req),
    }))
}

pub fn admin_login_submit(req: &mut Request, app: &App) -> ResultResp {
    portal_login(req, app, Portal::Employee)
}

fn portal_login(req: &mut Request, app: &App, which: Portal) -> ResultResp {
    let form = parse_submission(req)?;
    let user_name = form.get("userName").trim().to_string();
    let password = form.get("password").to_string();

    let render_error = |message: &str| {
        let error = Some(message.to_string());
        match which {
            Portal::Customer => html_response(login_page(&LoginVm {
                user_name: user_name.clone(),
                error,
                flash: None,
            })),
            Portal::Employee => html_response(admin_login_page(&AdminLoginVm {
                user_name: user_name.clone(),
                error,
                flash: None,
            })),
        }
    };

    if user_name.is_empty() || password.is_empty() {
        return render_error("User name and password are required");
    }

    match portal::login(&app.api, which, &user_name, &password) {
        Ok(token) => {
            let target = match which {
                Portal::Customer => "/",
                Portal::Employee => "/admin",
            };
            redirect_with_cookie(target, &portal::session_cookie(which, &token))
        }
        Err(ApiError::Status { status: 400 | 401, .. }) => {
            render_error("Invalid user name or password")
        }
        Err(err) => {
            eprintln!("login failed: {err}");
            render_error("Could not sign in right now. Please try again.")
        }
    }
}

pub fn logout(which: Portal) -> ResultResp {
    let target = match which {
        Portal::Customer => "/",
        Portal::Employee => "/admin/login",
    };
    redirect_with_cookie(target, &portal::clear_cookie(which))
}

pub fn register_view(req: &Request) -> ResultResp {
    html_response(register_page(&RegisterVm {
        values: BTreeMap::new(),
        errors: BTreeMap::new(),
        flash: flash_from(req),
    }))
}

fn collect_profile_errors(form: &ParsedForm) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for (name, label, kind) in PROFILE_FIELDS {
        if let Some(message) = check_field(label, *kind, true, form.get(name)) {
            errors.insert(name.to_string(), message);
        }
    }
    errors
}

pub fn register_submit(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_submission(req)?;

    let mut values = BTreeMap::new();
    for name in ["fullName", "userName", "phoneNumber", "email"] {
        values.insert(name.to_string(), form.get(name).trim().to_string());
    }

    let mut errors = collect_profile_errors(&form);
    if let Some(message) = check_field("User Name", FieldKind::Text, true, form.get("userName")) {
        errors.insert("userName".to_string(), message);
    }
    if let Some(message) = check_field("Password", FieldKind::Password, true, form.get("password"))
    {
        errors.insert("password".to_string(), message);
    }

    let render = |values: BTreeMap<String, String>, errors: BTreeMap<String, String>| {
        html_response(register_page(&RegisterVm {
            values,
            errors,
            flash: None,
        }))
    };

    // Field errors block the submit before any network call.
    if !errors.is_empty() {
        return render(values, errors);
    }

    let api_req = ApiRequest::new(Method::Post, "/Users/Customer/register").json(json!({
        "fullName": values["fullName"],
        "userName": values["userName"],
        "phoneNumber": values["phoneNumber"],
        "email": values["email"],
        "password": form.get("password"),
    }));

    match app.api.send(&api_req) {
        Ok(_) => redirect(&with_flash("/login", "Account created. Please sign in.")),
        Err(ApiError::Conflict(tokens)) => {
            let mapped = conflict_errors(&tokens);
            if mapped.is_empty() {
                return render(
                    values,
                    BTreeMap::from([(
                        "userName".to_string(),
                        "Account could not be created".to_string(),
                    )]),
                );
            }
            render(values, mapped)
        }
        Err(err) => {
            eprintln!("registration failed: {err}");
            render(
                values,
                BTreeMap::from([(
                    "userName".to_string(),
                    "Could not create the account right now".to_string(),
                )]),
            )
        }
    }
}

fn fetch_orders(app: &App, token: &str) -> Vec<Invoice> {
    let req = ApiRequest::new(Method::Get, "/Invoices/mine").bearer(Some(token.to_string()));
    match app.api.get_json(&req) {
        Ok(orders) => orders,
        Err(err) => {
            eprintln!("order history fetch failed: {err}");
            Vec::new()
        }
    }
}

pub fn account_view(req: &Request, app: &App) -> ResultResp {
    let Some(token) = portal::portal_token(req, Portal::Customer) else {
        return redirect(Portal::Customer.login_route());
    };

    let profile_req = ApiRequest::new(Method::Get, "/Users/Customer/profile")
        .bearer(Some(token.clone()));
    let profile: crate::api::models::CustomerProfile = app.api.get_json(&profile_req)?;

    let mut values = BTreeMap::new();
    values.insert("fullName".to_string(), profile.full_name);
    values.insert("phoneNumber".to_string(), profile.phone_number);
    values.insert("email".to_string(), profile.email);

    let seed = profile.address.unwrap_or_default();
    let selector = AddressSelector::from_seed(&app.regions, &seed);

    html_response(account_page(&AccountVm {
        values,
        errors: BTreeMap::new(),
        selector: &selector,
        orders: fetch_orders(app, &token),
        flash: flash_from(req),
    }))
}

pub fn account_submit(req: &mut Request, app: &App) -> ResultResp {
    let Some(token) = portal::portal_token(req, Portal::Customer) else {
        return redirect(Portal::Customer.login_route());
    };
    let form = parse_submission(req)?;

    let mut selector = AddressSelector::new(&app.regions);
    selector.select_city(form.get("city"));
    selector.select_district(form.get("district"));
    selector.select_ward(form.get("ward"));

    let mut values = BTreeMap::new();
    for (name, _, _) in PROFILE_FIELDS {
        values.insert(name.to_string(), form.get(name).trim().to_string());
    }

    let render = |selector: &AddressSelector,
                  values: BTreeMap<String, String>,
                  errors: BTreeMap<String, String>| {
        html_response(account_page(&AccountVm {
            values,
            errors,
            selector,
            orders: Vec::new(),
            flash: None,
        }))
    };

    // Cascade reload without saving.
    if form.get("save").is_empty() {
        return render(&selector, values, BTreeMap::new());
    }

    let mut errors = collect_profile_errors(&form);
    for (field, message) in selector.submit_errors() {
        errors.insert(field.to_string(), message);
    }
    if !errors.is_empty() {
        return render(&selector, values, errors);
    }

    let api_req = ApiRequest::new(Method::Put, "/Users/Customer/profile")
        .bearer(Some(token))
        .json(json!({
            "fullName": values["fullName"],
            "phoneNumber": values["phoneNumber"],
            "email": values["email"],
            "address": selector.address(),
        }));

    match app.api.get_json::<LoginResponse>(&api_req) {
        // The backend rotates the token on profile update; write the
        // fresh one back so later requests carry it.
        Ok(rotated) => redirect_with_cookie(
            &with_flash("/account", "Profile updated."),
            &portal::session_cookie(Portal::Customer, &rotated.token),
        ),
        Err(ApiError::Conflict(tokens)) => {
            let mapped = conflict_errors(&tokens);
            if mapped.is_empty() {
                return redirect(&with_flash("/account", "Could not save your profile."));
            }
            render(&selector, values, mapped)
        }
        Err(err) => {
            eprintln!("profile update failed: {err}");
            redirect(&with_flash("/account", "Could not save your profile."))
        }
    }
}
