// api/client.rs
use crate::api::ApiError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One request to the REST backend, transport-agnostic so tests can
/// inspect exactly what would go over the wire.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: ApiBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: ApiBody::Empty,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn json(mut self, value: Value) -> Self {
        self.body = ApiBody::Json(value);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = ApiBody::Multipart(form);
        self
    }
}

#[derive(Debug, Clone)]
pub enum ApiBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Wire abstraction over the backend. Production uses blocking reqwest;
/// router tests substitute a recording mock.
pub trait Transport: Send + Sync {
    fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, req.path);

        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url).query(&req.query);

        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match &req.body {
            ApiBody::Empty => builder,
            ApiBody::Json(value) => builder.json(value),
            ApiBody::Multipart(form) => {
                let mut mp = reqwest::blocking::multipart::Form::new();
                for (key, value) in &form.fields {
                    mp = mp.text(key.clone(), value.clone());
                }
                if let Some(file) = &form.file {
                    let part = reqwest::blocking::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone())
                        .mime_str(&file.mime)
                        .map_err(|e| ApiError::Network(e.to_string()))?;
                    mp = mp.part(file.field.clone(), part);
                }
                builder.multipart(mp)
            }
        };

        let resp = builder.send().map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_vec();

        Ok(ApiResponse { status, body })
    }
}

/// Cheap-to-clone handle to the backend, passed into every route handler.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
}

impl Api {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(base_url)?),
        })
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request and map the status taxonomy: 2xx passes through,
    /// 409 becomes `Conflict` with its violation tokens, anything else
    /// becomes `Status`.
    pub fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let resp = self.transport.send(req)?;

        if resp.status == 409 {
            return Err(ApiError::Conflict(extract_conflict_tokens(&resp.body)));
        }
        if resp.status >= 400 {
            return Err(ApiError::Status {
                status: resp.status,
                body: resp.text(),
            });
        }

        Ok(resp)
    }

    pub fn get_json<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T, ApiError> {
        self.send(req)?.json()
    }

    /// Send and require one exact success status (201 for create,
    /// 200/204 for update, 204 for delete).
    pub fn send_expect(&self, req: &ApiRequest, expected: u16) -> Result<(), ApiError> {
        let resp = self.send(req)?;
        if resp.status != expected {
            return Err(ApiError::Status {
                status: resp.status,
                body: resp.text(),
            });
        }
        Ok(())
    }
}

/// Pull violation tokens out of a 409 body. The backend sends either a
/// bare JSON array of strings or an object with an `errors` array; an
/// unparseable body yields no tokens and callers fall back to a generic
/// failure notice.
fn extract_conflict_tokens(body: &[u8]) -> Vec<String> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let array = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("errors") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    array
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("description")
                .or_else(|| obj.get("code"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}
