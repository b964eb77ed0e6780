use super::*;
use axum::http::{HeaderMap, HeaderValue};

const SECRET: &str = "test-secret";

fn headers_with_cookie(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("cookie", HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_sign_verify_roundtrip() {
    let signed = create_signed_value(SECRET, "jwt-token-value").unwrap();
    assert_eq!(
        verify_signed_value(SECRET, &signed).as_deref(),
        Some("jwt-token-value")
    );
}

#[test]
fn test_verify_rejects_tampered_value() {
    let signed = create_signed_value(SECRET, "jwt-token-value").unwrap();
    let tampered = signed.replace("jwt", "jxt");
    assert!(verify_signed_value(SECRET, &tampered).is_none());
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let signed = create_signed_value(SECRET, "jwt-token-value").unwrap();
    assert!(verify_signed_value("other-secret", &signed).is_none());
}

#[test]
fn test_verify_rejects_garbage() {
    assert!(verify_signed_value(SECRET, "no-separator").is_none());
    assert!(verify_signed_value(SECRET, "value:not base64!!").is_none());
    assert!(verify_signed_value(SECRET, "").is_none());
}

#[test]
fn test_empty_secret_rejected() {
    assert!(matches!(
        create_signed_value("", "token"),
        Err(SessionError::EmptySecret)
    ));
}

#[test]
fn test_get_cookie_value_parses_multiple_cookies() {
    let headers = headers_with_cookie("theme=dark; admin_session=abc; lang=en");
    assert_eq!(
        get_cookie_value(&headers, SESSION_COOKIE).as_deref(),
        Some("abc")
    );
    assert_eq!(get_cookie_value(&headers, "theme").as_deref(), Some("dark"));
    assert!(get_cookie_value(&headers, "missing").is_none());
}

#[test]
fn test_state_unauthenticated_without_cookie() {
    let state = SessionState::from_headers(&HeaderMap::new(), SECRET);
    assert_eq!(state, SessionState::Unauthenticated);
    assert!(state.session().is_none());
}

#[test]
fn test_state_authenticated_with_valid_cookie() {
    let signed = create_signed_value(SECRET, "backend-jwt").unwrap();
    let headers = headers_with_cookie(&format!("{}={}", SESSION_COOKIE, signed));

    let state = SessionState::from_headers(&headers, SECRET);
    assert!(state.is_authenticated());
    assert_eq!(state.session().unwrap().token(), "backend-jwt");
}

#[test]
fn test_state_unauthenticated_with_forged_cookie() {
    let headers = headers_with_cookie(&format!("{}=forged:AAAA", SESSION_COOKIE));
    let state = SessionState::from_headers(&headers, SECRET);
    assert_eq!(state, SessionState::Unauthenticated);
}

#[test]
fn test_session_cookie_attributes() {
    let cookie = session_cookie(SECRET, "backend-jwt").unwrap();
    assert!(cookie.starts_with("admin_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
}

#[test]
fn test_clear_cookie_expires_immediately() {
    let cookie = clear_session_cookie();
    assert!(cookie.starts_with("admin_session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[test]
fn test_expired_session_response_clears_and_redirects() {
    let response = expired_session_response();
    assert!(response.status().is_redirection());

    let set_cookie = response
        .headers()
        .get(axum::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=0"));

    let location = response
        .headers()
        .get(axum::http::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "/admin/login");
}
