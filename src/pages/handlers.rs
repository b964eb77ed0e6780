use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use super::content;
use super::{
    api_error_response, base_globals, markdown_to_html, not_found_response, post_card, render_page,
};
use crate::AppState;

fn services_list() -> Vec<liquid::model::Value> {
    content::SERVICES
        .iter()
        .map(|service| {
            liquid::model::Value::Object(liquid::object!({
                "slug": service.slug,
                "title": service.title,
                "summary": service.summary,
                "url": format!("/services/{}", service.slug),
            }))
        })
        .collect()
}

fn testimonials_list() -> Vec<liquid::model::Value> {
    content::TESTIMONIALS
        .iter()
        .map(|t| {
            liquid::model::Value::Object(liquid::object!({
                "quote": t.quote,
                "name": t.name,
                "course": t.course,
            }))
        })
        .collect()
}

pub async fn home_handler(State(state): State<AppState>) -> Response {
    // The recent-posts strip is decorative here: a backend failure
    // degrades to an empty section rather than an error page.
    let recent_posts: Vec<liquid::model::Value> = match state.api.list_posts().await {
        Ok(posts) => posts
            .iter()
            .filter(|p| p.is_published())
            .take(state.config.blog.home_preview_count)
            .map(|p| post_card(&state, p))
            .collect(),
        Err(e) => {
            warn!("Home page blog preview unavailable: {}", e);
            Vec::new()
        }
    };

    let mut globals = base_globals(
        &state,
        "Your Pathway to Australian Education",
        "Education counselling, visa assistance, and travel services for international students",
    );
    globals.insert(
        "services".into(),
        liquid::model::Value::Array(services_list().into_iter().take(4).collect()),
    );
    globals.insert(
        "testimonials".into(),
        liquid::model::Value::Array(testimonials_list()),
    );
    globals.insert(
        "recent_posts".into(),
        liquid::model::Value::Array(recent_posts),
    );

    render_page(&state, "pages/index.html.liquid", StatusCode::OK, globals).await
}

pub async fn about_handler(State(state): State<AppState>) -> Response {
    let globals = base_globals(
        &state,
        "About Us",
        "Who we are and how we help students reach Australia",
    );
    render_page(&state, "pages/about.html.liquid", StatusCode::OK, globals).await
}

pub async fn services_index_handler(State(state): State<AppState>) -> Response {
    let mut globals = base_globals(
        &state,
        "Our Services",
        "Education, visa, insurance, and travel services for international students",
    );
    globals.insert(
        "services".into(),
        liquid::model::Value::Array(services_list()),
    );
    render_page(
        &state,
        "pages/services_index.html.liquid",
        StatusCode::OK,
        globals,
    )
    .await
}

pub async fn service_detail_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let Some(service) = content::find_service(&slug) else {
        return not_found_response(&state).await;
    };

    let mut globals = base_globals(&state, service.title, service.summary);
    globals.insert(
        "service".into(),
        liquid::model::Value::Object(liquid::object!({
            "slug": service.slug,
            "title": service.title,
            "summary": service.summary,
            "details_html": markdown_to_html(service.details),
        })),
    );

    render_page(
        &state,
        "pages/service_detail.html.liquid",
        StatusCode::OK,
        globals,
    )
    .await
}

pub async fn contact_handler(State(state): State<AppState>) -> Response {
    let globals = base_globals(
        &state,
        "Contact Us",
        "Get in touch with our counsellors for a free consultation",
    );
    render_page(&state, "pages/contact.html.liquid", StatusCode::OK, globals).await
}

pub async fn travel_handler(State(state): State<AppState>) -> Response {
    let offers: Vec<liquid::model::Value> = content::TRAVEL_OFFERS
        .iter()
        .map(|offer| {
            liquid::model::Value::Object(liquid::object!({
                "title": offer.title,
                "description": offer.description,
            }))
        })
        .collect();

    let mut globals = base_globals(
        &state,
        "StarLink Travel",
        "Student fares, flexible tickets, and travel support",
    );
    globals.insert("offers".into(), liquid::model::Value::Array(offers));

    render_page(&state, "pages/travel.html.liquid", StatusCode::OK, globals).await
}

#[derive(Deserialize)]
pub struct BlogQuery {
    page: Option<usize>,
}

pub async fn blog_index_handler(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Response {
    let page = query.page.unwrap_or(0);
    let per_page = state.config.blog.posts_per_page;

    let posts = match state.api.list_posts().await {
        Ok(posts) => posts,
        Err(e) => return api_error_response(&state, &e, &state.config.blog.url_prefix).await,
    };

    // Date-sorted projection held only for this render; drafts are not
    // shown publicly.
    let published: Vec<_> = posts.iter().filter(|p| p.is_published()).collect();
    let total_pages = published.len().div_ceil(per_page).max(1);
    let start = (page * per_page).min(published.len());
    let end = (start + per_page).min(published.len());

    let cards: Vec<liquid::model::Value> = published[start..end]
        .iter()
        .map(|p| post_card(&state, p))
        .collect();

    let mut globals = base_globals(&state, "Blog", "News and guides for international students");
    globals.insert("posts".into(), liquid::model::Value::Array(cards));
    globals.insert(
        "url_prefix".into(),
        liquid::model::Value::scalar(state.config.blog.url_prefix.clone()),
    );
    globals.insert(
        "current_page".into(),
        liquid::model::Value::scalar(page as i64),
    );
    globals.insert(
        "total_pages".into(),
        liquid::model::Value::scalar(total_pages as i64),
    );
    globals.insert("has_prev".into(), liquid::model::Value::scalar(page > 0));
    globals.insert(
        "has_next".into(),
        liquid::model::Value::scalar(page + 1 < total_pages),
    );
    globals.insert(
        "prev_page".into(),
        liquid::model::Value::scalar(page.saturating_sub(1) as i64),
    );
    globals.insert(
        "next_page".into(),
        liquid::model::Value::scalar((page + 1) as i64),
    );

    render_page(
        &state,
        "pages/blog_index.html.liquid",
        StatusCode::OK,
        globals,
    )
    .await
}

pub async fn blog_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    // Non-numeric ids are treated as missing posts, not client errors.
    let Ok(id) = id.parse::<u64>() else {
        return not_found_response(&state).await;
    };

    let retry_url = format!("{}/{}", state.config.blog.url_prefix, id);
    let post = match state.api.get_post(id).await {
        Ok(post) => post,
        Err(e) => return api_error_response(&state, &e, &retry_url).await,
    };

    if !post.is_published() {
        return not_found_response(&state).await;
    }

    let tags: Vec<liquid::model::Value> = post
        .tags
        .iter()
        .map(|t| liquid::model::Value::scalar(t.clone()))
        .collect();

    let base_url = state
        .config
        .app
        .base_url
        .clone()
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let mut globals = base_globals(&state, &post.title, &post.excerpt(160));

    let mut detail = liquid::object!({
        "id": post.id as i64,
        "title": post.title.clone(),
        // Backend HTML is sanitized before it reaches the template.
        "content_html": crate::sanitize::clean_html(&post.content),
        "image_url": state.api.image_url(post.image.as_deref()),
        "date": post.created_at.to_rfc3339(),
        "date_formatted": post.formatted_date(),
        "read_time": post.read_time_minutes() as i64,
        "author": post.admin_username.clone().unwrap_or_default(),
    });
    detail.insert("tags".into(), liquid::model::Value::Array(tags));
    globals.insert("post".into(), liquid::model::Value::Object(detail));
    globals.insert(
        "og_type".into(),
        liquid::model::Value::scalar("article"),
    );
    globals.insert(
        "og_url".into(),
        liquid::model::Value::scalar(format!(
            "{}{}/{}",
            base_url, state.config.blog.url_prefix, post.id
        )),
    );
    globals.insert(
        "article_published_time".into(),
        liquid::model::Value::scalar(post.created_at.to_rfc3339()),
    );

    render_page(
        &state,
        "pages/blog_detail.html.liquid",
        StatusCode::OK,
        globals,
    )
    .await
}

pub async fn not_found_handler(State(state): State<AppState>) -> impl IntoResponse {
    not_found_response(&state).await
}
