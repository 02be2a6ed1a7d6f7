//! PSK-based admin authentication module.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};

/// Header name for the admin API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Extract the presented key from either the API-key header or a bearer token.
fn presented_key(headers: &HeaderMap) -> Option<String> {
    if let Some(key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(key.to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Whether this request carries a valid admin key.
///
/// With no PSK configured (dev mode) every request counts as admin, matching
/// the middleware behavior.
pub fn is_admin(headers: &HeaderMap, expected_psk: Option<&str>) -> bool {
    let Some(expected) = expected_psk else {
        return true;
    };
    match presented_key(headers) {
        Some(key) => constant_time_compare(&key, expected),
        None => false,
    }
}

/// PSK authentication layer for admin routes.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    let Some(expected) = expected_psk else {
        return next.run(request).await;
    };

    match presented_key(request.headers()) {
        Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid API key"),
        None => unauthorized_response("Missing or invalid API key"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
            details: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_is_admin_dev_mode() {
        let headers = HeaderMap::new();
        assert!(is_admin(&headers, None));
    }

    #[test]
    fn test_is_admin_header_key() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "secret".parse().unwrap());
        assert!(is_admin(&headers, Some("secret")));
        assert!(!is_admin(&headers, Some("other")));
    }

    #[test]
    fn test_is_admin_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(is_admin(&headers, Some("secret")));
    }

    #[test]
    fn test_is_admin_missing_key() {
        let headers = HeaderMap::new();
        assert!(!is_admin(&headers, Some("secret")));
    }
}
