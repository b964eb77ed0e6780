use reqwest::{StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::ApiError;
use super::types::{
    BlogEnvelope, BlogPost, LoginCredentials, LoginResponse, MessageResponse, PostDraft,
    SessionInfo,
};
use crate::ApiConfig;
use crate::session::AdminSession;

/// Shown when a post has no image of its own.
pub const DEFAULT_POST_IMAGE: &str = "/static/images/default-post.svg";

/// Typed client for the consultancy backend REST API.
///
/// Stateless request/response wrapper: a fixed timeout per call, bearer
/// auth from an injected session, and response-shape normalization. No
/// caching, no retries; each call is fire-once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        // Catch a misconfigured base URL at construction, not on the
        // first page view.
        url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Client(format!("invalid API base URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the public URL for a post image. Handles the three shapes the
    /// backend has historically returned: a bare filename, an
    /// `/uploads/`-prefixed path, and a fully qualified URL. The uploads
    /// prefix is applied exactly once.
    pub fn image_url(&self, image: Option<&str>) -> String {
        let Some(path) = image.filter(|p| !p.trim().is_empty()) else {
            return DEFAULT_POST_IMAGE.to_string();
        };

        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let clean = path.trim_start_matches('/');
        let clean = clean.strip_prefix("api/uploads/").unwrap_or(clean);
        let clean = clean.strip_prefix("uploads/").unwrap_or(clean);

        format!("{}/uploads/{}", self.base_url, urlencoding::encode(clean))
    }

    /// Fetch all posts, newest first. The backend already orders by
    /// creation date, but the sort is re-applied here so views never
    /// depend on it.
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        let url = self.endpoint("/blogs");
        debug!(url = %url, "Fetching blog list");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let mut posts: Vec<BlogPost> = decode(response).await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, id: u64) -> Result<BlogPost, ApiError> {
        let url = self.endpoint(&format!("/blogs/{}", id));
        debug!(url = %url, "Fetching blog post");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode(response).await
    }

    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("/admin/login");
        debug!(url = %url, "Authenticating admin");

        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode(response).await
    }

    /// Read-before-use check of a stored token against the backend.
    #[instrument(skip(self, session))]
    pub async fn verify_session(&self, session: &AdminSession) -> Result<SessionInfo, ApiError> {
        let url = self.endpoint("/admin/dashboard");

        let response = self
            .http
            .get(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode(response).await
    }

    #[instrument(skip(self, session, draft), fields(title = %draft.title))]
    pub async fn create_post(
        &self,
        session: &AdminSession,
        draft: PostDraft,
    ) -> Result<BlogPost, ApiError> {
        let url = self.endpoint("/admin/blogs");
        debug!(url = %url, "Creating blog post");

        let response = self
            .http
            .post(&url)
            .bearer_auth(session.token())
            .multipart(multipart_form(draft)?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let envelope: BlogEnvelope = decode(response).await?;
        Ok(envelope.blog)
    }

    #[instrument(skip(self, session, draft), fields(title = %draft.title))]
    pub async fn update_post(
        &self,
        session: &AdminSession,
        id: u64,
        draft: PostDraft,
    ) -> Result<BlogPost, ApiError> {
        let url = self.endpoint(&format!("/admin/blogs/{}", id));
        debug!(url = %url, "Updating blog post");

        let response = self
            .http
            .put(&url)
            .bearer_auth(session.token())
            .multipart(multipart_form(draft)?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let envelope: BlogEnvelope = decode(response).await?;
        Ok(envelope.blog)
    }

    /// Idempotent from the caller's view: a repeat delete yields
    /// `NotFound`, which dashboards treat as already gone.
    #[instrument(skip(self, session))]
    pub async fn delete_post(&self, session: &AdminSession, id: u64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/admin/blogs/{}", id));
        debug!(url = %url, "Deleting blog post");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let _: MessageResponse = decode(response).await?;
        Ok(())
    }
}

fn multipart_form(draft: PostDraft) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new()
        .text("title", draft.title)
        .text("content", draft.content);

    if let Some(image) = draft.image {
        let part = reqwest::multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::Client(e.to_string()))?;
        form = form.part("image", part);
    }

    Ok(form)
}

/// Normalize a backend response: non-2xx statuses become typed errors and
/// non-JSON or malformed bodies become `Unexpected` carrying the raw
/// payload.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let body = response.text().await.map_err(ApiError::from_transport)?;

    if !status.is_success() {
        return Err(map_error_status(status, &body));
    }

    if !is_json {
        warn!(status = %status, "Backend returned a non-JSON body");
        return Err(ApiError::Unexpected {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(status = %status, error = %e, "Backend returned a malformed body");
        ApiError::Unexpected {
            status: status.as_u16(),
            body,
        }
    })
}

pub(crate) fn map_error_status(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation {
            message: extract_error_message(body)
                .unwrap_or_else(|| "The submission was rejected".to_string()),
        },
        s if s.is_server_error() => ApiError::Server {
            status: s.as_u16(),
        },
        s => ApiError::Unexpected {
            status: s.as_u16(),
            body: body.to_string(),
        },
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<MessageResponse>(body)
        .ok()
        .and_then(|m| m.error.or(m.message))
}
