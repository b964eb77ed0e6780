use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Title length accepted by the backend, enforced here first.
pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
/// Minimum body length for a publishable post.
pub const CONTENT_MIN_CHARS: usize = 50;
/// Upload cap mirrored from the backend (8 MB).
pub const IMAGE_MAX_BYTES: usize = 8 * 1024 * 1024;
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Words-per-minute basis for the derived read-time estimate.
const READ_TIME_WPM: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

/// A blog post as returned by the backend. The backend owns the record;
/// we only hold transient, render-local copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    /// Raw HTML from the backend editor. Must be sanitized before render.
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub admin_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub admin_username: Option<String>,
}

impl BlogPost {
    /// Drafts are hidden from public views; anything else renders.
    pub fn is_published(&self) -> bool {
        !matches!(self.status, Some(PostStatus::Draft))
    }

    /// Estimated reading time in whole minutes, never zero.
    pub fn read_time_minutes(&self) -> usize {
        let words = crate::sanitize::strip_tags(&self.content)
            .split_whitespace()
            .count();
        words.div_ceil(READ_TIME_WPM).max(1)
    }

    /// Plain-text excerpt for listing cards, truncated on a character
    /// boundary with an ellipsis.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = crate::sanitize::strip_tags(&self.content);
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.chars().count() <= max_chars {
            return collapsed;
        }

        let truncated: String = collapsed.chars().take(max_chars).collect();
        match truncated.rfind(' ') {
            Some(idx) if idx > 0 => format!("{}…", &truncated[..idx]),
            _ => format!("{}…", truncated),
        }
    }

    /// Human date in the style the site uses everywhere ("March 4, 2025").
    pub fn formatted_date(&self) -> String {
        format_display_date(&self.created_at)
    }
}

pub fn format_display_date(date: &DateTime<Utc>) -> String {
    format!(
        "{} {}, {}",
        match date.month() {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "",
        },
        date.day(),
        date.year()
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "adminID", alias = "admin_id", default)]
    pub admin_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Response from the authenticated dashboard/verify endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "adminID", alias = "admin_id", default)]
    pub admin_id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Image payload attached to a post submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// A field-level validation message, displayed verbatim next to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Create/update payload, validated at the edge before submission.
/// The backend revalidates; this just keeps obviously bad posts local.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN_CHARS {
            errors.push(FieldError {
                field: "title",
                message: format!("Title must be at least {} characters", TITLE_MIN_CHARS),
            });
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(FieldError {
                field: "title",
                message: format!("Title must be at most {} characters", TITLE_MAX_CHARS),
            });
        }

        if self.content.trim().chars().count() < CONTENT_MIN_CHARS {
            errors.push(FieldError {
                field: "content",
                message: format!("Content must be at least {} characters", CONTENT_MIN_CHARS),
            });
        }

        if let Some(image) = &self.image {
            match image.extension() {
                Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => {}
                _ => errors.push(FieldError {
                    field: "image",
                    message: format!(
                        "Invalid file format. Allowed: {}",
                        ALLOWED_IMAGE_EXTENSIONS.join(", ")
                    ),
                }),
            }

            if image.bytes.len() > IMAGE_MAX_BYTES {
                errors.push(FieldError {
                    field: "image",
                    message: "Image too large (max 8MB)".to_string(),
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Generic `{"message": ...}` / `{"error": ...}` envelope the backend uses
/// for statuses without a resource body.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Create/update responses wrap the post alongside a status message.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogEnvelope {
    pub blog: BlogPost,
    #[serde(default)]
    pub message: Option<String>,
}
