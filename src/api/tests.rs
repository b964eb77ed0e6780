use super::client::map_error_status;
use super::*;
use crate::ApiConfig;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;

fn test_client() -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: "http://localhost:8080/api".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn post_with_content(content: &str) -> BlogPost {
    BlogPost {
        id: 1,
        title: "Test".to_string(),
        content: content.to_string(),
        image: None,
        admin_id: None,
        created_at: Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap(),
        updated_at: None,
        status: None,
        tags: Vec::new(),
        admin_username: None,
    }
}

#[test]
fn test_image_url_bare_filename() {
    let client = test_client();
    assert_eq!(
        client.image_url(Some("photo.jpg")),
        "http://localhost:8080/api/uploads/photo.jpg"
    );
}

#[test]
fn test_image_url_already_prefixed() {
    let client = test_client();
    assert_eq!(
        client.image_url(Some("/uploads/photo.jpg")),
        "http://localhost:8080/api/uploads/photo.jpg"
    );
    assert_eq!(
        client.image_url(Some("uploads/photo.jpg")),
        "http://localhost:8080/api/uploads/photo.jpg"
    );
    assert_eq!(
        client.image_url(Some("/api/uploads/photo.jpg")),
        "http://localhost:8080/api/uploads/photo.jpg"
    );
}

#[test]
fn test_image_url_absolute_passthrough() {
    let client = test_client();
    assert_eq!(
        client.image_url(Some("http://cdn/photo.jpg")),
        "http://cdn/photo.jpg"
    );
    assert_eq!(
        client.image_url(Some("https://cdn.example.com/a/b.png")),
        "https://cdn.example.com/a/b.png"
    );
}

#[test]
fn test_image_url_missing_falls_back_to_default() {
    let client = test_client();
    assert_eq!(client.image_url(None), DEFAULT_POST_IMAGE);
    assert_eq!(client.image_url(Some("")), DEFAULT_POST_IMAGE);
    assert_eq!(client.image_url(Some("   ")), DEFAULT_POST_IMAGE);
}

#[test]
fn test_image_url_encodes_unsafe_characters() {
    let client = test_client();
    assert_eq!(
        client.image_url(Some("my photo.jpg")),
        "http://localhost:8080/api/uploads/my%20photo.jpg"
    );
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = ApiClient::new(&ApiConfig {
        base_url: "http://localhost:8080/api/".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080/api");
    assert_eq!(
        client.image_url(Some("photo.jpg")),
        "http://localhost:8080/api/uploads/photo.jpg"
    );
}

#[test]
fn test_map_error_status_auth() {
    assert!(matches!(
        map_error_status(StatusCode::UNAUTHORIZED, ""),
        ApiError::Unauthorized
    ));
    assert!(matches!(
        map_error_status(StatusCode::FORBIDDEN, ""),
        ApiError::Forbidden
    ));
}

#[test]
fn test_map_error_status_not_found_and_server() {
    assert!(matches!(
        map_error_status(StatusCode::NOT_FOUND, ""),
        ApiError::NotFound
    ));
    assert!(matches!(
        map_error_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
        ApiError::Server { status: 500 }
    ));
    assert!(matches!(
        map_error_status(StatusCode::BAD_GATEWAY, ""),
        ApiError::Server { status: 502 }
    ));
}

#[test]
fn test_map_error_status_validation_message_verbatim() {
    let err = map_error_status(StatusCode::BAD_REQUEST, r#"{"error": "Title is required"}"#);
    match err {
        ApiError::Validation { message } => assert_eq!(message, "Title is required"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_map_error_status_validation_without_body() {
    let err = map_error_status(StatusCode::UNPROCESSABLE_ENTITY, "not json");
    match err {
        ApiError::Validation { message } => assert!(!message.is_empty()),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_map_error_status_unexpected_keeps_payload() {
    let err = map_error_status(StatusCode::IM_A_TEAPOT, "short and stout");
    match err {
        ApiError::Unexpected { status, body } => {
            assert_eq!(status, 418);
            assert_eq!(body, "short and stout");
        }
        other => panic!("expected unexpected error, got {:?}", other),
    }
}

#[test]
fn test_draft_validation_accepts_valid_payload() {
    let draft = PostDraft {
        title: "Studying in Australia".to_string(),
        content: "x".repeat(types::CONTENT_MIN_CHARS),
        image: None,
    };
    assert!(draft.validate().is_ok());
}

#[test]
fn test_draft_validation_title_bounds() {
    let mut draft = PostDraft {
        title: "ab".to_string(),
        content: "x".repeat(100),
        image: None,
    };
    let errors = draft.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == "title"));

    draft.title = "abc".to_string();
    assert!(draft.validate().is_ok());

    draft.title = "a".repeat(types::TITLE_MAX_CHARS);
    assert!(draft.validate().is_ok());

    draft.title = "a".repeat(types::TITLE_MAX_CHARS + 1);
    let errors = draft.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == "title"));
}

#[test]
fn test_draft_validation_content_minimum() {
    let draft = PostDraft {
        title: "Valid title".to_string(),
        content: "x".repeat(types::CONTENT_MIN_CHARS - 1),
        image: None,
    };
    let errors = draft.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == "content"));
}

#[test]
fn test_draft_validation_image_rules() {
    let mut draft = PostDraft {
        title: "Valid title".to_string(),
        content: "x".repeat(100),
        image: Some(ImageUpload {
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0; 16],
        }),
    };
    let errors = draft.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.field == "image"));

    draft.image = Some(ImageUpload {
        file_name: "cover.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0; 16],
    });
    assert!(draft.validate().is_ok());

    draft.image = Some(ImageUpload {
        file_name: "cover.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0; types::IMAGE_MAX_BYTES + 1],
    });
    let errors = draft.validate().unwrap_err();
    assert!(errors.iter().any(|e| e.message.contains("8MB")));
}

#[test]
fn test_post_is_published() {
    let mut post = post_with_content("hello world");
    assert!(post.is_published());

    post.status = Some(PostStatus::Published);
    assert!(post.is_published());

    post.status = Some(PostStatus::Draft);
    assert!(!post.is_published());
}

#[test]
fn test_read_time_never_zero() {
    let post = post_with_content("<p>short</p>");
    assert_eq!(post.read_time_minutes(), 1);

    let long = format!("<p>{}</p>", "word ".repeat(450));
    let post = post_with_content(&long);
    assert_eq!(post.read_time_minutes(), 3);
}

#[test]
fn test_excerpt_strips_markup_and_truncates() {
    let post = post_with_content("<p>Visa <strong>processing</strong> explained in detail.</p>");
    assert_eq!(post.excerpt(200), "Visa processing explained in detail.");

    let post = post_with_content("<p>one two three four five six seven</p>");
    let excerpt = post.excerpt(12);
    assert!(excerpt.ends_with('…'));
    assert!(excerpt.chars().count() <= 13);
    assert!(!excerpt.contains('<'));
}

#[test]
fn test_formatted_date() {
    let post = post_with_content("hello");
    assert_eq!(post.formatted_date(), "March 4, 2025");
}

#[test]
fn test_blog_post_tolerates_minimal_backend_shape() {
    // The list endpoint returns bare records without status/tags.
    let json = r#"{
        "id": 7,
        "title": "Scholarships 101",
        "content": "<p>Body</p>",
        "image": "/uploads/cover.jpg",
        "admin_id": 1,
        "created_at": "2025-01-15T09:30:00Z",
        "updated_at": "2025-01-16T10:00:00Z"
    }"#;
    let post: BlogPost = serde_json::from_str(json).unwrap();
    assert_eq!(post.id, 7);
    assert_eq!(post.image.as_deref(), Some("/uploads/cover.jpg"));
    assert!(post.tags.is_empty());
    assert!(post.status.is_none());
    assert!(post.is_published());
}

#[test]
fn test_login_response_shapes() {
    let spec_shape: LoginResponse =
        serde_json::from_str(r#"{"token": "t1", "adminID": 4, "username": "admin"}"#).unwrap();
    assert_eq!(spec_shape.token, "t1");
    assert_eq!(spec_shape.admin_id, Some(4));
    assert_eq!(spec_shape.username.as_deref(), Some("admin"));

    let sparse: LoginResponse = serde_json::from_str(r#"{"token": "t2"}"#).unwrap();
    assert_eq!(sparse.token, "t2");
    assert!(sparse.admin_id.is_none());
}
