// src/forms.rs
//
// Request parsing for both portals: query strings, urlencoded form
// bodies, and the multipart submissions used by image-bearing admin
// forms. Upload constraints are enforced here, before the backend ever
// sees the file.
use crate::api::FilePart;
use crate::errors::ServerError;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

/// Client-side upload cap; the backend is assumed to enforce its own.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Some(q) = req.uri().query() {
        for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
            map.insert(k.into_owned(), v.into_owned());
        }
    }
    map
}

pub fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("read body failed: {e}")))?;
    Ok(bytes)
}

/// One submitted form, regardless of encoding.
#[derive(Debug, Default)]
pub struct ParsedForm {
    pub fields: HashMap<String, String>,
    pub file: Option<FilePart>,
}

impl ParsedForm {
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Parse a POST body as urlencoded or multipart, based on Content-Type.
pub fn parse_submission(req: &mut Request) -> Result<ParsedForm, ServerError> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = read_body(req)?;

    if let Some(boundary) = multipart_boundary(&content_type) {
        return parse_multipart(&body, &boundary);
    }

    let mut form = ParsedForm::default();
    for (k, v) in url::form_urlencoded::parse(&body) {
        form.fields.insert(k.into_owned(), v.into_owned());
    }
    Ok(form)
}

fn multipart_boundary(content_type: &str) -> Option<String> {
    let mime: mime::Mime = content_type.parse().ok()?;
    if mime.type_() != mime::MULTIPART {
        return None;
    }
    mime.get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
}

fn parse_multipart(body: &[u8], boundary: &str) -> Result<ParsedForm, ServerError> {
    let delimiter = format!("--{boundary}");
    let mut form = ParsedForm::default();

    for part in split_on(body, delimiter.as_bytes()) {
        // Parts start with \r\n after the boundary; the terminator part
        // is just "--".
        let part = strip_crlf(part);
        if part.is_empty() || part == b"--" {
            continue;
        }

        let Some(header_end) = find(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&part[..header_end]);
        let data = strip_trailing_crlf(&part[header_end + 4..]);

        let mut name = None;
        let mut filename = None;
        let mut content_type = None;
        for line in headers.lines() {
            let lower = line.to_ascii_lowercase();
            if lower.starts_with("content-disposition:") {
                name = header_param(line, "name");
                filename = header_param(line, "filename");
            } else if lower.starts_with("content-type:") {
                content_type = line.splitn(2, ':').nth(1).map(|v| v.trim().to_string());
            }
        }

        let Some(name) = name else { continue };

        match filename {
            // An empty filename means the file input was left blank.
            Some(filename) if !filename.is_empty() => {
                form.file = Some(FilePart {
                    field: name,
                    filename,
                    mime: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
                    bytes: data.to_vec(),
                });
            }
            Some(_) => {}
            None => {
                form.fields.insert(
                    name,
                    String::from_utf8_lossy(data).into_owned(),
                );
            }
        }
    }

    Ok(form)
}

fn header_param(line: &str, key: &str) -> Option<String> {
    for piece in line.split(';') {
        let piece = piece.trim();
        if let Some(rest) = piece.strip_prefix(key) {
            let rest = rest.trim_start();
            if let Some(value) = rest.strip_prefix('=') {
                return Some(value.trim().trim_matches('"').to_string());
            }
        }
    }
    None
}

fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some(pos) = find(&haystack[start..], needle) {
        parts.push(&haystack[start..start + pos]);
        start += pos + needle.len();
    }
    parts.push(&haystack[start..]);
    parts
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn strip_crlf(part: &[u8]) -> &[u8] {
    part.strip_prefix(b"\r\n".as_slice()).unwrap_or(part)
}

fn strip_trailing_crlf(data: &[u8]) -> &[u8] {
    data.strip_suffix(b"\r\n".as_slice()).unwrap_or(data)
}

/// Image uploads are restricted to jpg/jpeg/png/webp and 2 MB.
pub fn validate_upload(file: &FilePart) -> Result<(), String> {
    let extension = file
        .filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err("Image must be a jpg, jpeg, png or webp file".to_string());
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err("Image must be at most 2MB".to_string());
    }
    Ok(())
}
