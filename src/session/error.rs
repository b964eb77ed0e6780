use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cookie secret must not be empty")]
    EmptySecret,

    #[error("session cookie could not be encoded")]
    CookieEncoding,
}
