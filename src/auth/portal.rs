// src/auth/portal.rs
//
// Two independent bearer tokens, one per portal, held in distinct
// cookies. Presence of the cookie is the route-access gate; the token
// itself is whatever the backend's login endpoint returned and is
// re-read from the request on every call, so rotation after a profile
// update is observed immediately.
use crate::api::models::LoginResponse;
use crate::api::{Api, ApiError, ApiRequest, Method};
use astra::Request;
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use serde_json::json;

pub const CART_COOKIE: &str = "cart_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    Customer,
    Employee,
}

impl Portal {
    pub fn cookie_name(&self) -> &'static str {
        match self {
            Portal::Customer => "customer_token",
            Portal::Employee => "employee_token",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            Portal::Customer => "/Users/Customer/login",
            Portal::Employee => "/Users/Employee/login",
        }
    }

    pub fn login_route(&self) -> &'static str {
        match self {
            Portal::Customer => "/login",
            Portal::Employee => "/admin/login",
        }
    }
}

/// Read one cookie value from the request's Cookie header.
pub fn cookie_value(req: &Request, name: &str) -> Option<String> {
    let header = req.headers().get("Cookie")?.to_str().ok()?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
            if k == name {
                return Some(v.to_string());
            }
        }
    }
    None
}

pub fn portal_token(req: &Request, portal: Portal) -> Option<String> {
    cookie_value(req, portal.cookie_name()).filter(|t| !t.is_empty())
}

/// Exchange credentials for a bearer token at the portal's login
/// endpoint. The token is stored as-is in the portal cookie.
pub fn login(
    api: &Api,
    portal: Portal,
    user_name: &str,
    password: &str,
) -> Result<String, ApiError> {
    let req = ApiRequest::new(Method::Post, portal.login_path())
        .json(json!({ "userName": user_name, "password": password }));
    let resp: LoginResponse = api.get_json(&req)?;
    Ok(resp.token)
}

pub fn session_cookie(portal: Portal, token: &str) -> String {
    format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax",
        portal.cookie_name()
    )
}

pub fn clear_cookie(portal: Portal) -> String {
    format!("{}=; Path=/; Max-Age=0", portal.cookie_name())
}

/// Random URL-safe guest cart identity, minted on first cart touch.
pub fn generate_cart_token() -> String {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

pub fn cart_cookie(token: &str) -> String {
    format!("{CART_COOKIE}={token}; Path=/; SameSite=Lax")
}
