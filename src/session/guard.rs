use axum::{
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::SessionError;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "admin_session";

/// Session lifetime in seconds. There is no refresh; an expired cookie
/// (or a backend 401) forces a fresh login.
const SESSION_MAX_AGE_SECS: u64 = 86_400;

/// An authenticated admin session: the backend-issued bearer token,
/// recovered from a signed cookie. Passed explicitly into every
/// authenticated API call rather than read from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    token: String,
}

impl AdminSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// The guard's two states. Every admin request re-derives this from the
/// request headers; validity is never cached between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(AdminSession),
}

impl SessionState {
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Self {
        match get_cookie_value(headers, SESSION_COOKIE)
            .and_then(|signed| verify_signed_value(secret, &signed))
        {
            Some(token) => SessionState::Authenticated(AdminSession::new(token)),
            None => SessionState::Unauthenticated,
        }
    }

    pub fn session(&self) -> Option<&AdminSession> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Sign a value as `value:hmac-sha256-b64` for cookie storage.
pub fn create_signed_value(secret: &str, value: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::EmptySecret);
    }

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SessionError::EmptySecret)?;
    mac.update(value.as_bytes());
    let signature = mac.finalize().into_bytes();
    let signature_b64 = general_purpose::URL_SAFE_NO_PAD.encode(signature);
    Ok(format!("{}:{}", value, signature_b64))
}

/// Verify a signed cookie value and return the embedded value. The token
/// itself never contains `:`, so the last separator is the signature
/// boundary.
pub fn verify_signed_value(secret: &str, signed_value: &str) -> Option<String> {
    let (value, signature_b64) = signed_value.rsplit_once(':')?;
    let signature = general_purpose::URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(value.as_bytes());
    mac.verify_slice(&signature)
        .is_ok()
        .then(|| value.to_string())
}

pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get("cookie")?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let cookie = cookie.trim();
            let (key, value) = cookie.split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
}

/// Set-Cookie value establishing an authenticated session.
pub fn session_cookie(secret: &str, token: &str) -> Result<String, SessionError> {
    let signed = create_signed_value(secret, token)?;
    Ok(format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, signed, SESSION_MAX_AGE_SECS
    ))
}

/// Set-Cookie value clearing the session (logout or expiry).
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        SESSION_COOKIE
    )
}

/// Response for a backend 401 on any authenticated call: drop the stored
/// token and send the operator back to the login view.
pub fn expired_session_response() -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = clear_session_cookie().parse() {
        headers.insert(SET_COOKIE, value);
    }
    (headers, Redirect::to("/admin/login")).into_response()
}
