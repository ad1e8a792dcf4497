//! HTTP server adapters
//!
//! This module provides adapters that translate between HTTP frameworks
//! and the HTTP-agnostic API layer.
//!
//! - [`router`] - Framework-agnostic routing over the API handlers
//! - `tiny_http` - Lightweight blocking HTTP server

pub mod router;
pub mod tiny_http;

pub use router::{HttpMethod, HttpRequest, HttpResponse, route};
pub use self::tiny_http::serve;
