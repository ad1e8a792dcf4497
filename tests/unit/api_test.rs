//! Tests for the HTTP router and API handlers
//!
//! Requests go through `server::route`, the same entry point the
//! tiny_http adapter uses.

use healthdesk::api::{ApiContext, ApiError, ErrorCode};
use healthdesk::core::models::{Medication, Role};
use healthdesk::server::{HttpMethod, HttpRequest, HttpResponse, route};
use serde_json::{Value, json};

use crate::common::fixtures;

fn context() -> ApiContext {
    ApiContext::new(fixtures::stores())
}

fn send(ctx: &ApiContext, req: HttpRequest) -> (u16, Value) {
    let response = route(ctx, &req);
    let body = if response.body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body).unwrap()
    };
    (response.status, body)
}

fn post(url: &str, body: &Value) -> HttpRequest {
    HttpRequest::new(HttpMethod::Post, url, body.to_string())
}

fn get(url: &str) -> HttpRequest {
    HttpRequest::new(HttpMethod::Get, url, "")
}

fn has_cors(response: &HttpResponse) -> bool {
    response.header("Access-Control-Allow-Origin") == Some("*")
        && response
            .header("Access-Control-Allow-Headers")
            .is_some_and(|h| h.contains("authorization"))
}

fn login(ctx: &ApiContext, email: &str) -> String {
    let (status, body) =
        send(ctx, post("/api/v1/auth/login", &json!({"email": email, "password": fixtures::PASSWORD})));
    assert_eq!(status, 200, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized().status_code(), 401);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_unauthorized_message() {
        let err = ApiError::unauthorized();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Unauthorized");
    }
}

// =============================================================================
// HEALTH DATA ENDPOINT
// =============================================================================

mod health_data_tests {
    use super::*;

    const PATH: &str = "/functions/v1/health-data";

    #[test]
    fn test_summary_for_signed_in_user() {
        let ctx = context();
        let session = fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);
        ctx.stores
            .health
            .add_medication(&Medication::new(session.user_id(), "Metformin", None, None))
            .unwrap();

        let req = post(PATH, &json!({"action": "get_summary"})).with_bearer(&session.token);
        let response = route(&ctx, &req);
        assert_eq!(response.status, 200);
        assert!(has_cors(&response));

        let body: Value = serde_json::from_str(&response.body).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(body["medications"][0]["name"], "Metformin");
        assert_eq!(body["healthMetrics"], json!([]));
    }

    #[test]
    fn test_unknown_action_is_400() {
        let ctx = context();
        let session = fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);

        let req = post(PATH, &json!({"action": "delete_everything"})).with_bearer(&session.token);
        let response = route(&ctx, &req);
        assert_eq!(response.status, 400);
        assert!(has_cors(&response));
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"error": "Invalid action"}));
    }

    #[test]
    fn test_missing_token_is_500_unauthorized() {
        let ctx = context();
        let response = route(&ctx, &post(PATH, &json!({"action": "get_summary"})));
        assert_eq!(response.status, 500);
        assert!(has_cors(&response));
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body, json!({"error": "Unauthorized"}));
    }

    #[test]
    fn test_unknown_token_is_500_even_with_bad_action() {
        let ctx = context();
        let req = post(PATH, &json!({"action": "nope"})).with_bearer("not-a-token");
        let (status, body) = send(&ctx, req);
        assert_eq!(status, 500);
        assert_eq!(body["error"], "Unauthorized");
    }

    #[test]
    fn test_malformed_body_is_500() {
        let ctx = context();
        let session = fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);
        let req = HttpRequest::new(HttpMethod::Post, PATH, "{").with_bearer(&session.token);
        let response = route(&ctx, &req);
        assert_eq!(response.status, 500);
        assert!(has_cors(&response));
    }

    #[test]
    fn test_preflight() {
        let ctx = context();
        let response = route(&ctx, &HttpRequest::new(HttpMethod::Options, PATH, ""));
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
        assert!(has_cors(&response));
    }
}

// =============================================================================
// ENVELOPE ROUTES
// =============================================================================

mod envelope_tests {
    use super::*;

    #[test]
    fn test_unknown_route_is_404() {
        let ctx = context();
        let (status, body) = send(&ctx, get("/api/v1/nothing"));
        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(&ctx, get("/elsewhere"));
        assert_eq!(status, 404);
    }

    #[test]
    fn test_signup_and_login_with_both_prefixes() {
        let ctx = context();
        let signup = json!({
            "email": "pat@example.com",
            "password": "secret123",
            "full_name": "Pat Patient"
        });
        let (status, body) = send(&ctx, post("/api/auth/signup", &signup));
        assert_eq!(status, 200, "{body}");
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["role"], "patient");

        let (status, body) = send(
            &ctx,
            post("/api/v1/auth/login", &json!({"email": "pat@example.com", "password": "secret123"})),
        );
        assert_eq!(status, 200);
        assert_eq!(body["data"]["redirect"], "/");
    }

    #[test]
    fn test_signup_rejects_admin_role() {
        let ctx = context();
        let signup = json!({
            "email": "root@example.com",
            "password": "secret123",
            "full_name": "Root",
            "role": "admin"
        });
        let (status, body) = send(&ctx, post("/api/v1/auth/signup", &signup));
        assert_eq!(status, 403);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[test]
    fn test_duplicate_signup_is_400() {
        let ctx = context();
        fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);
        let signup = json!({
            "email": "pat@example.com",
            "password": "secret123",
            "full_name": "Again"
        });
        let (status, _) = send(&ctx, post("/api/v1/auth/signup", &signup));
        assert_eq!(status, 400);
    }

    #[test]
    fn test_wrong_password_is_401() {
        let ctx = context();
        fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);
        let (status, body) = send(
            &ctx,
            post("/api/v1/auth/login", &json!({"email": "pat@example.com", "password": "wrong"})),
        );
        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[test]
    fn test_invalid_json_is_400() {
        let ctx = context();
        let req = HttpRequest::new(HttpMethod::Post, "/api/v1/auth/login", "not json");
        let (status, body) = send(&ctx, req);
        assert_eq!(status, 400);
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_logout_ends_session() {
        let ctx = context();
        fixtures::account(&ctx.stores, "doc@example.com", Role::Doctor);
        let token = login(&ctx, "doc@example.com");

        let (status, body) =
            send(&ctx, post("/api/v1/auth/logout", &json!({})).with_bearer(&token));
        assert_eq!(status, 200);
        assert_eq!(body["data"]["redirect"], "/login");

        let (status, _) = send(&ctx, get("/api/v1/doctors/me/route").with_bearer(&token));
        assert_eq!(status, 401);
    }

    #[test]
    fn test_doctor_routes_require_doctor_role() {
        let ctx = context();
        fixtures::account(&ctx.stores, "pat@example.com", Role::Patient);
        let token = login(&ctx, "pat@example.com");

        let (status, _) = send(&ctx, get("/api/v1/doctors/me/dashboard").with_bearer(&token));
        assert_eq!(status, 403);
        let (status, _) = send(&ctx, get("/api/v1/doctors/me/dashboard"));
        assert_eq!(status, 401);
    }

    #[test]
    fn test_admin_routes_require_admin_role() {
        let ctx = context();
        let registration = fixtures::register(&ctx.stores, "doc@example.com");
        let token = login(&ctx, "doc@example.com");

        let url = format!("/api/v1/admin/doctors/{}/review", registration.profile.id);
        let (status, _) = send(&ctx, post(&url, &json!({"status": "verified"})).with_bearer(&token));
        assert_eq!(status, 403);
    }

    #[test]
    fn test_review_unknown_profile_is_404() {
        let ctx = context();
        fixtures::account(&ctx.stores, "admin@example.com", Role::Admin);
        let token = login(&ctx, "admin@example.com");

        let req = post("/api/v1/admin/doctors/missing/review", &json!({"status": "verified"}))
            .with_bearer(&token);
        let (status, body) = send(&ctx, req);
        assert_eq!(status, 404, "{body}");
    }

    #[test]
    fn test_doctor_without_profile_routes_to_register() {
        let ctx = context();
        fixtures::account(&ctx.stores, "doc@example.com", Role::Doctor);
        let token = login(&ctx, "doc@example.com");

        let (status, body) = send(&ctx, get("/api/v1/doctors/me/route").with_bearer(&token));
        assert_eq!(status, 200);
        assert_eq!(body["data"]["path"], "/doctor/register");

        let (status, body) = send(&ctx, get("/api/v1/doctors/me/verification").with_bearer(&token));
        assert_eq!(status, 404);
        assert!(body["error"]["message"].as_str().unwrap().contains("registration"));
    }

    #[test]
    fn test_resubmit_pending_profile_is_400() {
        let ctx = context();
        fixtures::register(&ctx.stores, "doc@example.com");
        let token = login(&ctx, "doc@example.com");

        let req = HttpRequest::new(HttpMethod::Post, "/api/v1/doctors/me/resubmit", "")
            .with_bearer(&token);
        let (status, _) = send(&ctx, req);
        assert_eq!(status, 400);
    }

    #[test]
    fn test_register_missing_documents_is_400() {
        let ctx = context();
        let body = json!({
            "basic": {"full_name": "Dr. X", "email": "x@example.com", "password": "secret123"},
            "professional": {"specializations": ["GP"], "experience_years": 1, "languages": ["English"]},
            "files": {"degree": {"name": "d.pdf", "content": [1, 2, 3]}}
        });
        let (status, body) = send(&ctx, post("/api/v1/doctors/register", &body));
        assert_eq!(status, 400);
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("government_id, medical_license")
        );
        assert!(ctx.stores.auth.find_by_email("x@example.com").unwrap().is_none());
    }

    #[test]
    fn test_doctor_search_query() {
        let ctx = context();
        let (status, body) = send(&ctx, get("/api/v1/doctors?search=heart%20care"));
        assert_eq!(status, 200);
        assert_eq!(body["data"]["doctors"], json!([]));
    }
}
