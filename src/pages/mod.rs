use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pulldown_cmark::{Options, Parser, html};
use tracing::error;

use crate::AppState;
use crate::api::{ApiError, BlogPost};

pub mod content;
pub mod handlers;

pub use handlers::{
    about_handler, blog_detail_handler, blog_index_handler, contact_handler, home_handler,
    not_found_handler, service_detail_handler, services_index_handler, travel_handler,
};

/// Globals every page template expects: site identity plus title/meta/og
/// fields. Handlers extend this with page-specific data.
pub(crate) fn base_globals(
    state: &AppState,
    page_title: &str,
    meta_description: &str,
) -> liquid::Object {
    let base_url = state
        .config
        .app
        .base_url
        .as_deref()
        .unwrap_or("http://localhost:3000");

    liquid::object!({
        "site_name": state.config.app.name.clone(),
        "base_url": base_url,
        "page_title": page_title,
        "meta_description": meta_description,
        "og_title": page_title,
        "og_description": meta_description,
        "og_type": "website",
    })
}

pub(crate) async fn render_page(
    state: &AppState,
    template: &str,
    status: StatusCode,
    mut globals: liquid::Object,
) -> Response {
    if !globals.contains_key("stylesheet_url") {
        globals.insert(
            "stylesheet_url".into(),
            liquid::model::Value::scalar(
                state
                    .static_handler
                    .get_versioned_url("/static/style.css")
                    .await,
            ),
        );
    }

    match state.template_engine.render_template(template, globals).await {
        Ok(rendered) => (status, Html(rendered)).into_response(),
        Err(e) => {
            error!("Template rendering error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Listing-card projection of a post: derived excerpt, resolved image
/// URL, formatted date, read time.
pub(crate) fn post_card(state: &AppState, post: &BlogPost) -> liquid::model::Value {
    let tags: Vec<liquid::model::Value> = post
        .tags
        .iter()
        .map(|t| liquid::model::Value::scalar(t.clone()))
        .collect();

    let mut card = liquid::object!({
        "id": post.id as i64,
        "url": format!("{}/{}", state.config.blog.url_prefix, post.id),
        "title": post.title.clone(),
        "excerpt": post.excerpt(180),
        "image_url": state.api.image_url(post.image.as_deref()),
        "date": post.created_at.to_rfc3339(),
        "date_formatted": post.formatted_date(),
        "read_time": post.read_time_minutes() as i64,
    });
    card.insert("tags".into(), liquid::model::Value::Array(tags));
    liquid::model::Value::Object(card)
}

pub(crate) async fn not_found_response(state: &AppState) -> Response {
    let globals = base_globals(
        state,
        "Page Not Found",
        "The page you are looking for does not exist",
    );
    render_page(
        state,
        "pages/not_found.html.liquid",
        StatusCode::NOT_FOUND,
        globals,
    )
    .await
}

/// Map an API failure to its display state: not-found view for missing
/// resources, otherwise an inline error page with a manual retry link.
pub(crate) async fn api_error_response(
    state: &AppState,
    err: &ApiError,
    retry_url: &str,
) -> Response {
    if matches!(err, ApiError::NotFound) {
        return not_found_response(state).await;
    }

    let (status, message) = match err {
        ApiError::Timeout => (
            StatusCode::GATEWAY_TIMEOUT,
            "The server took too long to respond. Please try again.",
        ),
        ApiError::Network(_) => (
            StatusCode::BAD_GATEWAY,
            "We couldn't reach the server. Please check your connection and try again.",
        ),
        ApiError::Server { .. } | ApiError::Unexpected { .. } => (
            StatusCode::BAD_GATEWAY,
            "Something went wrong on our end. Please try again.",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong. Please try again.",
        ),
    };

    error!("API error serving {}: {}", retry_url, err);

    let mut globals = base_globals(state, "Something went wrong", "Temporary error");
    globals.insert(
        "error_message".into(),
        liquid::model::Value::scalar(message),
    );
    globals.insert(
        "retry_url".into(),
        liquid::model::Value::scalar(retry_url.to_string()),
    );
    render_page(state, "pages/error.html.liquid", status, globals).await
}

pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
