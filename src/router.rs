// src/router.rs
use crate::app::App;
use crate::auth::portal::Portal;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{admin, auth, store};
use astra::{Body, Request, ResponseBuilder};
use std::path::Path;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        // Storefront
        ("GET", []) => store::home(&req, app),
        ("GET", ["products", id]) => store::product_detail(&req, app, id),
        ("GET", ["cart"]) => store::cart_view(&req, app),
        ("POST", ["cart", "add"]) => store::cart_add(&mut req, app),
        ("POST", ["cart", "update"]) => store::cart_update(&mut req, app),
        ("POST", ["cart", "remove"]) => store::cart_remove(&mut req, app),
        ("GET", ["checkout"]) => store::checkout_view(&req, app),
        ("POST", ["checkout"]) => store::checkout_submit(&mut req, app),
        ("GET", ["orders", id]) => store::order_view(&req, app, id),

        // Customer auth
        ("GET", ["login"]) => auth::login_view(&req),
        ("POST", ["login"]) => auth::login_submit(&mut req, app),
        ("POST", ["logout"]) => auth::logout(Portal::Customer),
        ("GET", ["register"]) => auth::register_view(&req),
        ("POST", ["register"]) => auth::register_submit(&mut req, app),
        ("GET", ["account"]) => auth::account_view(&req, app),
        ("POST", ["account"]) => auth::account_submit(&mut req, app),

        // Back office
        ("GET", ["admin"]) => admin::dashboard(&req),
        ("GET", ["admin", "login"]) => auth::admin_login_view(&req),
        ("POST", ["admin", "login"]) => auth::admin_login_submit(&mut req, app),
        ("POST", ["admin", "logout"]) => auth::logout(Portal::Employee),
        ("GET", ["admin", key]) => admin::list(&req, app, key),
        ("GET", ["admin", key, "new"]) => admin::new_form(&req, app, key),
        ("GET", ["admin", key, "export"]) => admin::export(&req, app, key),
        ("GET", ["admin", key, id, "edit"]) => admin::edit_form(&req, app, key, id),
        ("GET", ["admin", key, id, "delete"]) => admin::delete_confirm(&req, app, key, id),
        ("POST", ["admin", key, id, "delete"]) => admin::delete(&req, app, key, id),
        ("POST", ["admin", key, "save"]) => admin::save(&mut req, app, key),

        ("GET", ["static", file]) => serve_static(file),

        _ => Err(ServerError::NotFound),
    }
}

/// Serve a file from static/ next to the binary. The single-segment
/// route shape already rules out traversal; the stem check is belt for
/// odd names like "..".
fn serve_static(file: &str) -> ResultResp {
    if file.contains("..") {
        return Err(ServerError::NotFound);
    }
    let path = Path::new("static").join(file);
    let bytes = std::fs::read(&path).map_err(|_| ServerError::NotFound)?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}
