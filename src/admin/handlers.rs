use axum::{
    Form,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::forms::read_post_form;
use crate::AppState;
use crate::api::{ApiError, FieldError, LoginCredentials, PostDraft};
use crate::pages::{api_error_response, base_globals, not_found_response, render_page};
use crate::session::{
    AdminSession, SessionState, clear_session_cookie, expired_session_response, session_cookie,
};

/// Resolve the request's session or bounce to the login view. Every
/// admin handler re-reads the cookie; validity is never cached.
fn require_session(state: &AppState, headers: &HeaderMap) -> Result<AdminSession, Response> {
    match SessionState::from_headers(headers, &state.config.app.cookie_secret) {
        SessionState::Authenticated(session) => Ok(session),
        SessionState::Unauthenticated => Err(Redirect::to("/admin/login").into_response()),
    }
}

/// User-facing banner for API failures that are not field validation.
fn failure_banner(err: &ApiError) -> String {
    match err {
        ApiError::Timeout => "The server took too long to respond. Please try again.".to_string(),
        ApiError::Network(_) => "Could not reach the server. Please try again.".to_string(),
        ApiError::Forbidden => "You are not allowed to modify this post.".to_string(),
        other => other.to_string(),
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

async fn login_view(state: &AppState, email: &str, error: Option<String>) -> Response {
    let mut globals = base_globals(state, "Admin Login", "Sign in to manage blog posts");
    globals.insert("email".into(), liquid::model::Value::scalar(email.to_string()));
    if let Some(message) = error {
        globals.insert("error".into(), liquid::model::Value::scalar(message));
    }
    render_page(state, "admin/login.html.liquid", StatusCode::OK, globals).await
}

pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if SessionState::from_headers(&headers, &state.config.app.cookie_secret).is_authenticated() {
        return Redirect::to("/admin").into_response();
    }
    login_view(&state, "", None).await
}

pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = LoginCredentials {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.api.login(&credentials).await {
        Ok(login) => {
            let cookie = match session_cookie(&state.config.app.cookie_secret, &login.token) {
                Ok(cookie) => cookie,
                Err(e) => {
                    error!("Failed to create session cookie: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response();
                }
            };

            let mut response_headers = HeaderMap::new();
            match cookie.parse() {
                Ok(value) => {
                    response_headers.insert(SET_COOKIE, value);
                }
                Err(e) => {
                    error!("Failed to encode session cookie: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response();
                }
            }

            info!(
                "Admin {} logged in",
                login.username.as_deref().unwrap_or(&credentials.email)
            );
            (response_headers, Redirect::to("/admin")).into_response()
        }
        // Bad credentials and field complaints read the same to the
        // operator; neither persists a session.
        Err(ApiError::Unauthorized) | Err(ApiError::Validation { .. }) => {
            warn!("Failed admin login for {}", credentials.email);
            login_view(
                &state,
                &credentials.email,
                Some("Invalid email or password".to_string()),
            )
            .await
        }
        Err(e) => {
            error!("Login request failed: {}", e);
            login_view(&state, &credentials.email, Some(failure_banner(&e))).await
        }
    }
}

pub async fn logout_handler() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    if let Ok(value) = clear_session_cookie().parse() {
        headers.insert(SET_COOKIE, value);
    }
    (headers, Redirect::to("/admin/login"))
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    notice: Option<String>,
    error: Option<String>,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    // Token check against the backend before showing anything.
    let verified = match state.api.verify_session(&session).await {
        Ok(info) => info,
        Err(e) if e.is_auth() => return expired_session_response(),
        Err(e) => return api_error_response(&state, &e, "/admin").await,
    };

    let posts = match state.api.list_posts().await {
        Ok(posts) => posts,
        Err(e) if e.is_auth() => return expired_session_response(),
        Err(e) => return api_error_response(&state, &e, "/admin").await,
    };

    // Admin sees every post, drafts included.
    let rows: Vec<liquid::model::Value> = posts
        .iter()
        .map(|post| {
            liquid::model::Value::Object(liquid::object!({
                "id": post.id as i64,
                "title": post.title.clone(),
                "date_formatted": post.formatted_date(),
                "is_draft": !post.is_published(),
                "view_url": format!("{}/{}", state.config.blog.url_prefix, post.id),
                "edit_url": format!("/admin/blogs/{}/edit", post.id),
                "delete_url": format!("/admin/blogs/{}/delete", post.id),
            }))
        })
        .collect();

    let mut globals = base_globals(&state, "Admin Dashboard", "Manage blog posts");
    globals.insert("posts".into(), liquid::model::Value::Array(rows));
    globals.insert(
        "post_count".into(),
        liquid::model::Value::scalar(posts.len() as i64),
    );
    if let Some(admin_id) = verified.admin_id {
        globals.insert(
            "admin_id".into(),
            liquid::model::Value::scalar(admin_id as i64),
        );
    }
    if let Some(notice) = notice_text(query.notice.as_deref()) {
        globals.insert("notice".into(), liquid::model::Value::scalar(notice));
    }
    if let Some(error) = error_text(query.error.as_deref()) {
        globals.insert("error".into(), liquid::model::Value::scalar(error));
    }

    render_page(&state, "admin/dashboard.html.liquid", StatusCode::OK, globals).await
}

fn notice_text(notice: Option<&str>) -> Option<&'static str> {
    match notice? {
        "created" => Some("Blog post created successfully"),
        "updated" => Some("Blog post updated successfully"),
        "deleted" => Some("Blog post deleted"),
        _ => None,
    }
}

fn error_text(error: Option<&str>) -> Option<&'static str> {
    match error? {
        "forbidden" => Some("You are not allowed to modify that post"),
        "failed" => Some("The operation failed. Please try again."),
        _ => None,
    }
}

/// Everything the post editor template needs to render, for both the
/// create and edit flows.
struct PostFormView {
    heading: &'static str,
    submit_label: &'static str,
    action: String,
    title: String,
    content: String,
    current_image: Option<String>,
    field_errors: Vec<FieldError>,
    banner: Option<String>,
}

impl PostFormView {
    fn new_post() -> Self {
        Self {
            heading: "New Blog Post",
            submit_label: "Create Post",
            action: "/admin/blogs/new".to_string(),
            title: String::new(),
            content: String::new(),
            current_image: None,
            field_errors: Vec::new(),
            banner: None,
        }
    }

    fn edit_post(id: u64) -> Self {
        Self {
            heading: "Edit Blog Post",
            submit_label: "Save Changes",
            action: format!("/admin/blogs/{}/edit", id),
            ..Self::new_post()
        }
    }

    fn with_draft(mut self, draft: &PostDraft) -> Self {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self
    }
}

async fn post_form_response(state: &AppState, view: PostFormView) -> Response {
    let errors: Vec<liquid::model::Value> = view
        .field_errors
        .iter()
        .map(|e| {
            liquid::model::Value::Object(liquid::object!({
                "field": e.field,
                "message": e.message.clone(),
            }))
        })
        .collect();

    let mut globals = base_globals(state, view.heading, "Blog post editor");
    globals.insert(
        "form".into(),
        liquid::model::Value::Object(liquid::object!({
            "heading": view.heading,
            "submit_label": view.submit_label,
            "action": view.action,
            "title": view.title,
            "content": view.content,
            "current_image": view.current_image.unwrap_or_default(),
        })),
    );
    globals.insert("field_errors".into(), liquid::model::Value::Array(errors));
    if let Some(banner) = view.banner {
        globals.insert("error".into(), liquid::model::Value::scalar(banner));
    }

    render_page(state, "admin/post_form.html.liquid", StatusCode::OK, globals).await
}

pub async fn new_post_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(redirect) = require_session(&state, &headers) {
        return redirect;
    }
    post_form_response(&state, PostFormView::new_post()).await
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let draft = match read_post_form(multipart).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Unreadable post submission: {}", e);
            let view = PostFormView {
                banner: Some("The submission could not be read. Please try again.".to_string()),
                ..PostFormView::new_post()
            };
            return post_form_response(&state, view).await;
        }
    };

    if let Err(field_errors) = draft.validate() {
        let view = PostFormView {
            field_errors,
            ..PostFormView::new_post().with_draft(&draft)
        };
        return post_form_response(&state, view).await;
    }

    match state.api.create_post(&session, draft.clone()).await {
        Ok(post) => {
            info!("Created blog post {} ({})", post.id, post.title);
            Redirect::to("/admin?notice=created").into_response()
        }
        Err(e) if e.is_auth() => expired_session_response(),
        Err(ApiError::Validation { message }) => {
            let view = PostFormView {
                banner: Some(message),
                ..PostFormView::new_post().with_draft(&draft)
            };
            post_form_response(&state, view).await
        }
        Err(e) => {
            error!("Create post failed: {}", e);
            let view = PostFormView {
                banner: Some(failure_banner(&e)),
                ..PostFormView::new_post().with_draft(&draft)
            };
            post_form_response(&state, view).await
        }
    }
}

pub async fn edit_post_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    if let Err(redirect) = require_session(&state, &headers) {
        return redirect;
    }

    let post = match state.api.get_post(id).await {
        Ok(post) => post,
        Err(ApiError::NotFound) => return not_found_response(&state).await,
        Err(e) => return api_error_response(&state, &e, &format!("/admin/blogs/{}/edit", id)).await,
    };

    let view = PostFormView {
        title: post.title.clone(),
        content: post.content.clone(),
        current_image: post
            .image
            .as_deref()
            .map(|image| state.api.image_url(Some(image))),
        ..PostFormView::edit_post(id)
    };
    post_form_response(&state, view).await
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    let draft = match read_post_form(multipart).await {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Unreadable post submission: {}", e);
            let view = PostFormView {
                banner: Some("The submission could not be read. Please try again.".to_string()),
                ..PostFormView::edit_post(id)
            };
            return post_form_response(&state, view).await;
        }
    };

    if let Err(field_errors) = draft.validate() {
        let view = PostFormView {
            field_errors,
            ..PostFormView::edit_post(id).with_draft(&draft)
        };
        return post_form_response(&state, view).await;
    }

    match state.api.update_post(&session, id, draft.clone()).await {
        Ok(post) => {
            info!("Updated blog post {} ({})", post.id, post.title);
            Redirect::to("/admin?notice=updated").into_response()
        }
        Err(e) if e.is_auth() => expired_session_response(),
        Err(ApiError::NotFound) => not_found_response(&state).await,
        Err(ApiError::Validation { message }) => {
            let view = PostFormView {
                banner: Some(message),
                ..PostFormView::edit_post(id).with_draft(&draft)
            };
            post_form_response(&state, view).await
        }
        Err(e) => {
            error!("Update post {} failed: {}", id, e);
            let view = PostFormView {
                banner: Some(failure_banner(&e)),
                ..PostFormView::edit_post(id).with_draft(&draft)
            };
            post_form_response(&state, view).await
        }
    }
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let session = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(redirect) => return redirect,
    };

    match state.api.delete_post(&session, id).await {
        Ok(()) => {
            info!("Deleted blog post {}", id);
            Redirect::to("/admin?notice=deleted").into_response()
        }
        // Already gone: a repeated delete is not an error.
        Err(ApiError::NotFound) => Redirect::to("/admin?notice=deleted").into_response(),
        Err(e) if e.is_auth() => expired_session_response(),
        Err(ApiError::Forbidden) => Redirect::to("/admin?error=forbidden").into_response(),
        Err(e) => {
            error!("Delete post {} failed: {}", id, e);
            Redirect::to("/admin?error=failed").into_response()
        }
    }
}
