pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_POST_IMAGE};
pub use error::ApiError;
pub use types::{
    BlogPost, FieldError, ImageUpload, LoginCredentials, LoginResponse, PostDraft, PostStatus,
    SessionInfo,
};

#[cfg(test)]
mod tests;
