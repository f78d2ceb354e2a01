//! Token authentication for scan requests.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

/// Extract the authorization header value.
pub fn extract_auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Parse the token from an `Authorization` value.
///
/// Accepts `token <t>` and `Bearer <t>`, with the scheme in any case.
pub fn parse_token(auth_header: &str) -> Option<&str> {
    let (scheme, token) = auth_header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// Whether `token` is one of the configured tokens.
pub fn is_valid_token(token: &str, tokens: &[String]) -> bool {
    tokens
        .iter()
        .fold(false, |found, t| constant_time_compare(token, t) | found)
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.auth.enabled {
        return Ok(next.run(request).await);
    }

    let auth_header = extract_auth_header(request.headers())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;
    let token = parse_token(&auth_header).ok_or_else(|| {
        AppError::Authentication("Malformed authorization header".to_string())
    })?;

    if !is_valid_token(token, &state.config.auth.tokens) {
        tracing::warn!("Rejected request with invalid token");
        return Err(AppError::Authentication("Invalid token".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("token abc123"), Some("abc123"));
        assert_eq!(parse_token("Token abc123"), Some("abc123"));
        assert_eq!(parse_token("Bearer abc123"), Some("abc123"));
        assert_eq!(parse_token("bearer abc123"), Some("abc123"));
        assert_eq!(parse_token("Basic abc123"), None);
        assert_eq!(parse_token("token "), None);
        assert_eq!(parse_token("abc123"), None);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("secret", "secret"));
        assert!(!constant_time_compare("secret", "secreT"));
        assert!(!constant_time_compare("secret", "secrets"));
    }

    #[test]
    fn test_is_valid_token() {
        let tokens = vec!["one".to_string(), "two".to_string()];
        assert!(is_valid_token("two", &tokens));
        assert!(!is_valid_token("three", &tokens));
        assert!(!is_valid_token("one", &[]));
    }
}
