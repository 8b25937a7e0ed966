//! Comment board and comment writer.

use fitpin_commerce::comment::comments_by;
use fitpin_commerce::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::api::{FitpinApi, ImageBytes};
use crate::session::SessionContext;
use crate::ClientError;

/// A comment with its resolved image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub comment: FitComment,
    pub image_url: String,
}

/// The signed-in user's fit comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBoard {
    pub entries: Vec<BoardEntry>,
}

impl CommentBoard {
    /// Fetch all comments and keep the user's own with text.
    pub async fn load(api: &FitpinApi, session: &SessionContext) -> Result<Self, ClientError> {
        let email = session.require_email()?;
        let mine = comments_by(api.fetch_comments().await?, email);
        let entries = mine
            .into_iter()
            .map(|comment| {
                let image_url = api.fit_storage_image_url(&comment.image)?;
                Ok(BoardEntry { comment, image_url })
            })
            .collect::<Result<Vec<_>, ClientError>>()?;
        debug!(count = entries.len(), "comment board loaded");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// URLs of the user's fit-storage images, newest first.
pub async fn fit_storage_urls(
    api: &FitpinApi,
    session: &SessionContext,
) -> Result<Vec<String>, ClientError> {
    let email = session.require_email()?;
    api.fetch_fit_storage_images(email)
        .await?
        .iter()
        .map(|image| api.fit_storage_image_url(&image.image))
        .collect()
}

/// The comment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWriter {
    pub draft: CommentDraft,
}

impl Default for CommentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentWriter {
    pub fn new() -> Self {
        Self {
            draft: CommentDraft::new(),
        }
    }

    /// Start from an image picked elsewhere, such as the fit box.
    pub fn with_image(image_uri: impl Into<String>) -> Self {
        let mut writer = Self::new();
        writer.draft.image_uri = Some(image_uri.into());
        writer
    }

    /// Validate, upload the image if the server lacks it, then save.
    ///
    /// Returns the comment as saved.
    pub async fn submit(
        &self,
        api: &FitpinApi,
        session: &SessionContext,
    ) -> Result<SavedComment, ClientError> {
        self.draft.validate()?;
        let email = session.require_email()?;
        let local_name = self
            .draft
            .image_name()
            .ok_or(ValidationError::ImageNotSelected)?;
        let uri = self
            .draft
            .image_uri
            .as_deref()
            .ok_or(ValidationError::ImageNotSelected)?;

        let image_name = if api.image_exists(local_name).await? {
            debug!(local_name, "image already stored, skipping upload");
            local_name.to_string()
        } else {
            let image = read_image(api, uri).await?;
            api.upload_fit_image(email, local_name, image).await?
        };

        let saved = self.draft.to_saved(email, image_name);
        api.save_comment(&saved).await?;
        info!(item_name = %saved.item_name, "comment submitted");
        Ok(saved)
    }
}

/// Load image bytes from a URL or a local path.
async fn read_image(api: &FitpinApi, uri: &str) -> Result<ImageBytes, ClientError> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return api.download_image(uri).await;
    }
    let path = uri.strip_prefix("file://").unwrap_or(uri);
    let bytes = tokio::fs::read(path).await?;
    Ok(ImageBytes {
        content_type: content_type_for(Path::new(path)).to_string(),
        bytes,
    })
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for(Path::new("a/b.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("fit.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("fit.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_writer_defaults() {
        let writer = CommentWriter::with_image("/tmp/fit.jpg");
        assert_eq!(writer.draft.image_name(), Some("fit.jpg"));
        assert_eq!(writer.draft.category, "상의");
    }
}
