pub mod error;
pub mod guard;

pub use error::SessionError;
pub use guard::{
    AdminSession, SESSION_COOKIE, SessionState, clear_session_cookie, create_signed_value,
    expired_session_response, get_cookie_value, session_cookie, verify_signed_value,
};

#[cfg(test)]
mod tests;
