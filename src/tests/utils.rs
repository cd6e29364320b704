// src/tests/utils.rs
//
// Shared test plumbing: a recording transport standing in for the REST
// backend, plus helpers to build an App and astra requests.
use crate::api::{Api, ApiBody, ApiError, ApiRequest, ApiResponse, Method, Transport};
use crate::app::App;
use crate::domain::address::AddressTree;
use astra::Body;
use serde_json::Value;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Everything one backend call carried, captured for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: ApiBody,
}

struct CannedRoute {
    method: Method,
    path: String,
    status: u16,
    body: Vec<u8>,
}

/// Backend stand-in: canned responses per (method, path), every call
/// recorded. Unrouted requests answer 404 so an unexpected call fails
/// the test instead of passing silently.
pub struct MockTransport {
    routes: Vec<CannedRoute>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes.push(CannedRoute {
            method,
            path: path.to_string(),
            status,
            body: body.to_string().into_bytes(),
        });
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: req.method,
            path: req.path.clone(),
            query: req.query.clone(),
            bearer: req.bearer.clone(),
            body: req.body.clone(),
        });

        match self
            .routes
            .iter()
            .find(|r| r.method == req.method && r.path == req.path)
        {
            Some(route) => Ok(ApiResponse {
                status: route.status,
                body: route.body.clone(),
            }),
            None => Ok(ApiResponse {
                status: 404,
                body: b"{}".to_vec(),
            }),
        }
    }
}

/// Small two-city region tree, ASCII names to keep form bodies simple.
pub fn test_regions() -> AddressTree {
    AddressTree::from_json_str(
        r#"[
            {"Id": "01", "Name": "Hanoi", "Districts": [
                {"Id": "001", "Name": "BaDinh", "Wards": [
                    {"Id": "00001", "Name": "PhucXa"},
                    {"Id": "00002", "Name": "TrucBach"}
                ]},
                {"Id": "002", "Name": "HoanKiem", "Wards": [
                    {"Id": "00037", "Name": "HangBac"}
                ]}
            ]},
            {"Id": "79", "Name": "Saigon", "Districts": [
                {"Id": "760", "Name": "DistrictOne", "Wards": [
                    {"Id": "26734", "Name": "BenNghe"}
                ]}
            ]}
        ]"#,
    )
    .unwrap()
}

pub fn test_app(mock: Arc<MockTransport>) -> App {
    App::new(Api::with_transport(mock), test_regions())
}

pub fn get(path: &str, cookie: Option<&str>) -> astra::Request {
    let mut builder = http::Request::builder().method(http::Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(path: &str, body: &str, cookie: Option<&str>) -> astra::Request {
    let mut builder = http::Request::builder()
        .method(http::Method::POST)
        .uri(path)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

pub fn location(resp: &astra::Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

pub fn set_cookie(resp: &astra::Response) -> String {
    resp.headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
