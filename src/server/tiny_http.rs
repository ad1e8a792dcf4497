//! `tiny_http` server adapter
//!
//! Converts `tiny_http` requests into [`HttpRequest`], routes them and
//! writes the [`HttpResponse`] back.

use std::io::{Cursor, Read as _};

use ::tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::ApiContext;

use super::router::{self, HttpMethod, HttpRequest, HttpResponse};

/// Bind `address` and serve requests until the process exits
pub fn serve(ctx: &ApiContext, address: &str) -> anyhow::Result<()> {
    let server =
        Server::http(address).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
    log::info!("Listening on http://{address}");

    for mut request in server.incoming_requests() {
        let response = match convert_request(&mut request) {
            Ok(req) => router::route(ctx, &req),
            Err(e) => HttpResponse {
                status: 400,
                headers: Vec::new(),
                body: format!("Failed to read request body: {e}"),
            },
        };
        log::info!("{} {} -> {}", request.method(), request.url(), response.status);
        if let Err(e) = request.respond(convert_response(response)) {
            log::warn!("Failed to write response: {e}");
        }
    }
    Ok(())
}

fn convert_request(request: &mut Request) -> std::io::Result<HttpRequest> {
    let method = match request.method() {
        Method::Get => HttpMethod::Get,
        Method::Post => HttpMethod::Post,
        Method::Options => HttpMethod::Options,
        _ => HttpMethod::Other,
    };
    let headers = request
        .headers()
        .iter()
        .map(|h| (h.field.as_str().as_str().to_string(), h.value.as_str().to_string()))
        .collect();

    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;

    Ok(HttpRequest {
        method,
        url: request.url().to_string(),
        headers,
        body,
    })
}

fn convert_response(response: HttpResponse) -> Response<Cursor<Vec<u8>>> {
    let mut converted =
        Response::from_data(response.body.into_bytes()).with_status_code(StatusCode(response.status));
    for (name, value) in response.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => converted.add_header(header),
            Err(()) => log::warn!("Dropping invalid header {name}"),
        }
    }
    converted
}
