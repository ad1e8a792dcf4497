//! Framework-agnostic request routing
//!
//! Maps method and path onto the API handlers and turns their results
//! into status, headers and a JSON body. The HTTP adapters only convert
//! to and from [`HttpRequest`] / [`HttpResponse`].
//!
//! Two wire formats are served:
//!
//! - `/api/...` and `/api/v1/...` use the `{success, data | error}` envelope
//! - `/functions/v1/health-data` answers with the bare summary or
//!   `{ "error": ... }`, with CORS headers on every response

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{self, ApiContext, ApiError, ApiResponse, ErrorCode, FunctionError};
use crate::core::services::{ProfileUpdate, ReviewDecision};

/// Path of the aggregation endpoint
pub const HEALTH_DATA_PATH: &str = "/functions/v1/health-data";

/// CORS headers attached to every aggregation endpoint response
pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "authorization, x-client-info, apikey, content-type"),
];

/// HTTP methods the router distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// OPTIONS (CORS preflight)
    Options,
    /// Anything else
    Other,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Options => write!(f, "OPTIONS"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// An incoming request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Path including any query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Raw body
    pub body: String,
}

impl HttpRequest {
    /// Build a request without headers
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add `Authorization: Bearer {token}`
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {token}"))
    }

    /// First header with `name` (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Token from `Authorization: Bearer ...`
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.header("Authorization")?.trim();
        let (scheme, token) = value.split_once(' ')?;
        scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
    }

    /// Path without the query string
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(path, _)| path)
    }

    /// Decoded value of a query parameter
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| percent_decode(value))
    }
}

/// A response ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Body
    pub body: String,
}

impl HttpResponse {
    fn json<T: Serialize>(data: &T, status: u16) -> Self {
        let body =
            serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
        }
    }

    fn with_cors(mut self) -> Self {
        self.headers
            .extend(CORS_HEADERS.iter().map(|(n, v)| ((*n).to_string(), (*v).to_string())));
        self
    }

    /// First header with `name` (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Route a request to its handler
pub fn route(ctx: &ApiContext, req: &HttpRequest) -> HttpResponse {
    let path = req.path();
    log::debug!("{} {}", req.method, path);

    if path == HEALTH_DATA_PATH {
        return health_data_route(ctx, req);
    }

    // Supports both /api/v1/... (versioned) and /api/... (unversioned)
    let Some(api_path) = path.strip_prefix("/api/v1").or_else(|| path.strip_prefix("/api"))
    else {
        return not_found_response(&format!("Not found: {} {path}", req.method));
    };
    let token = req.bearer_token();

    if req.method == HttpMethod::Post {
        if let Some(id) = path_id(api_path, "/admin/doctors/", "/review") {
            return handle_result(
                read_json::<ReviewDecision>(&req.body)
                    .and_then(|d| api::review_doctor(ctx, token, id, &d)),
            );
        }
        if let Some(id) = path_id(api_path, "/admin/credentials/", "/review") {
            return handle_result(
                read_json::<ReviewDecision>(&req.body)
                    .and_then(|d| api::review_credential(ctx, token, id, &d)),
            );
        }
    }

    match (req.method, api_path) {
        (HttpMethod::Post, "/auth/signup") => {
            handle_result(read_json(&req.body).and_then(|r| api::sign_up(ctx, &r)))
        },
        (HttpMethod::Post, "/auth/login") => {
            handle_result(read_json(&req.body).and_then(|r| api::login(ctx, &r)))
        },
        (HttpMethod::Post, "/auth/logout") => handle_result(api::logout(ctx, token)),

        (HttpMethod::Post, "/doctors/register") => {
            handle_result(read_json(&req.body).and_then(|r| api::register(ctx, &r)))
        },
        (HttpMethod::Get, "/doctors") => {
            handle_result(api::list_doctors(ctx, req.query_param("search").as_deref()))
        },
        (HttpMethod::Get, "/doctors/me/verification") => {
            handle_result(api::verification_status(ctx, token))
        },
        (HttpMethod::Get, "/doctors/me/route") => handle_result(api::route(ctx, token)),
        (HttpMethod::Get, "/doctors/me/dashboard") => handle_result(api::dashboard(ctx, token)),
        (HttpMethod::Post, "/doctors/me/resubmit") => handle_result(
            read_optional_json::<ProfileUpdate>(&req.body)
                .and_then(|update| api::resubmit(ctx, token, update)),
        ),

        _ => not_found_response(&format!("API endpoint not found: {} {api_path}", req.method)),
    }
}

/// `{prefix}{id}{suffix}` with a single-segment id
fn path_id<'a>(path: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

/// Aggregation endpoint with its own status mapping
///
/// Unknown actions are 400; unauthorized callers, malformed bodies and
/// store failures are all 500 with the message in `error`.
fn health_data_route(ctx: &ApiContext, req: &HttpRequest) -> HttpResponse {
    if req.method == HttpMethod::Options {
        return HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        }
        .with_cors();
    }

    let response = match api::health_data(ctx, req.bearer_token(), &req.body) {
        Ok(summary) => HttpResponse::json(&summary, 200),
        Err(e) => {
            let status = if e.code == ErrorCode::BadRequest { 400 } else { 500 };
            if status == 500 {
                log::error!("health-data failed: {}", e.message);
            }
            HttpResponse::json(&FunctionError { error: e.message }, status)
        },
    };
    response.with_cors()
}

// =============================================================================
// BODY PARSING
// =============================================================================

fn read_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

/// Empty body means `None`
fn read_optional_json<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        Ok(None)
    } else {
        read_json(body).map(Some)
    }
}

fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                (Some(high), Some(low)) => {
                    out.push(high << 4 | low);
                    i += 2;
                },
                _ => out.push(b'%'),
            },
            other => out.push(other),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::json(&ApiResponse::success(data), 200),
        Err(e) => error_response(&e),
    }
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> HttpResponse {
    if error.code == ErrorCode::Internal {
        log::error!("{error}");
    }
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    HttpResponse::json(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> HttpResponse {
    let response = ApiResponse::<()>::error("NOT_FOUND", message);
    HttpResponse::json(&response, 404)
}
