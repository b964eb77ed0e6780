use crate::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Handler for /robots.txt
/// Returns a permissive robots.txt that allows all crawlers
pub async fn robots_txt_handler(State(app_state): State<AppState>) -> Response {
    // A robots.txt dropped into the static directory wins over the default
    let custom_robots_path = app_state.config.static_files.directory.join("robots.txt");

    if custom_robots_path.exists() {
        match tokio::fs::read_to_string(&custom_robots_path).await {
            Ok(content) => {
                return (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    content,
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!("Failed to read custom robots.txt: {}", e);
            }
        }
    }

    let default_robots = r#"# robots.txt
# Allow all web crawlers; keep them out of the admin area

User-agent: *
Allow: /
Disallow: /admin
Crawl-delay: 1
"#;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        default_robots,
    )
        .into_response()
}
