use axum::extract::Multipart;
use thiserror::Error;

use crate::api::{ImageUpload, PostDraft};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read form submission: {0}")]
    Read(String),
}

/// Read the post editor's multipart submission into a draft. An image
/// field with no file selected (empty filename or empty body) counts as
/// "no image", which on update means the existing image is kept.
pub async fn read_post_form(mut multipart: Multipart) -> Result<PostDraft, FormError> {
    let mut draft = PostDraft::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Read(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                draft.title = field
                    .text()
                    .await
                    .map_err(|e| FormError::Read(e.to_string()))?;
            }
            Some("content") => {
                draft.content = field
                    .text()
                    .await
                    .map_err(|e| FormError::Read(e.to_string()))?;
            }
            Some("image") => {
                let file_name = field.file_name().map(str::to_string).unwrap_or_default();
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Read(e.to_string()))?;

                if !file_name.is_empty() && !bytes.is_empty() {
                    draft.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(draft)
}
