use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod admin;
pub mod api;
pub mod pages;
pub mod robots;
pub mod sanitize;
pub mod session;
pub mod startup_checks;
pub mod static_files;
pub mod templating;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub templates: TemplateConfig,
    pub static_files: StaticConfig,
    pub api: ApiConfig,
    pub blog: BlogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub log_level: String,
    /// HMAC key for the admin session cookie.
    pub cookie_secret: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticConfig {
    pub directory: PathBuf,
}

/// Where the backend REST API lives and how long we wait for it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Fixed per-request timeout. Requests past this are aborted and
    /// surface as timeout errors; pages never hang on the backend.
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_api_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogConfig {
    #[serde(default = "default_blog_prefix")]
    pub url_prefix: String,
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
    /// How many recent posts the home page shows.
    #[serde(default = "default_home_preview_count")]
    pub home_preview_count: usize,
}

fn default_blog_prefix() -> String {
    "/blog".to_string()
}

fn default_posts_per_page() -> usize {
    9
}

fn default_home_preview_count() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            app: AppConfig {
                name: "Starlink Education & Visa Services".to_string(),
                log_level: "info".to_string(),
                cookie_secret: "change-me-in-production".to_string(),
                base_url: None,
            },
            templates: TemplateConfig {
                directory: PathBuf::from("templates"),
            },
            static_files: StaticConfig {
                directory: PathBuf::from("static"),
            },
            api: ApiConfig {
                base_url: default_api_base_url(),
                timeout_secs: default_api_timeout_secs(),
            },
            blog: BlogConfig {
                url_prefix: default_blog_prefix(),
                posts_per_page: default_posts_per_page(),
                home_preview_count: default_home_preview_count(),
            },
        }
    }
}

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub template_engine: Arc<templating::TemplateEngine>,
    pub static_handler: static_files::StaticFileHandler,
    pub api: Arc<api::ApiClient>,
    pub config: Config,
}

async fn static_file_handler(
    State(app_state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let has_version = query.contains_key("v");
    app_state.static_handler.serve(&path, has_version).await
}

pub async fn create_app(config: Config) -> Result<Router, api::ApiError> {
    let template_engine = Arc::new(templating::TemplateEngine::new(
        config.templates.directory.clone(),
    ));

    let static_handler =
        static_files::StaticFileHandler::new(config.static_files.directory.clone());

    let api_client = Arc::new(api::ApiClient::new(&config.api)?);

    let app_state = AppState {
        template_engine,
        static_handler,
        api: api_client,
        config: config.clone(),
    };

    let router = Router::new()
        .route("/", get(pages::home_handler))
        .route("/about", get(pages::about_handler))
        .route("/services", get(pages::services_index_handler))
        .route("/services/{slug}", get(pages::service_detail_handler))
        .route("/contact", get(pages::contact_handler))
        .route("/travel", get(pages::travel_handler))
        .route("/blog", get(pages::blog_index_handler))
        .route("/blog/{id}", get(pages::blog_detail_handler))
        .route(
            "/admin/login",
            get(admin::login_page).post(admin::login_submit),
        )
        .route("/admin/logout", get(admin::logout_handler))
        .route("/admin", get(admin::dashboard_handler))
        .route(
            "/admin/blogs/new",
            get(admin::new_post_form).post(admin::create_post_handler),
        )
        .route(
            "/admin/blogs/{id}/edit",
            get(admin::edit_post_form).post(admin::update_post_handler),
        )
        .route("/admin/blogs/{id}/delete", post(admin::delete_post_handler))
        .route("/robots.txt", get(robots::robots_txt_handler))
        .route("/static/{*path}", get(static_file_handler))
        .fallback(pages::not_found_handler)
        // Room for the 8 MB image cap plus the rest of the form.
        .layer(DefaultBodyLimit::max(api::types::IMAGE_MAX_BYTES + 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let method = request.method();
                    let uri = request.uri();
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::info_span!(
                        "http_request",
                        method = %method,
                        uri = %uri,
                        matched_path,
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    let method = request.method();
                    let uri = request.uri();
                    let headers = request.headers();
                    let user_agent = headers
                        .get("user-agent")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");
                    let referer = headers
                        .get("referer")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");

                    tracing::info!(
                        target: "access_log",
                        method = %method,
                        path = %uri.path(),
                        query = ?uri.query(),
                        user_agent = %user_agent,
                        referer = %referer,
                        "request"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status();
                        let size = response
                            .headers()
                            .get("content-length")
                            .and_then(|h| h.to_str().ok())
                            .unwrap_or("-");

                        tracing::info!(
                            target: "access_log",
                            status = %status,
                            size = %size,
                            latency_ms = %latency.as_millis(),
                            "response"
                        );
                    },
                ),
        )
        .with_state(app_state);

    Ok(router)
}
