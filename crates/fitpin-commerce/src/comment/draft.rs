//! Comment draft typed into the write screen.

use crate::error::ValidationError;
use crate::ids::UserEmail;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category preselected on the write screen.
pub const DEFAULT_COMMENT_CATEGORY: &str = "상의";

/// How the garment fit, as chosen on the write screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitOption {
    #[serde(rename = "약간 작다")]
    SlightlySmall,
    #[serde(rename = "딱 맞는다")]
    JustRight,
    #[serde(rename = "약간 크다")]
    SlightlyLarge,
}

impl FitOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitOption::SlightlySmall => "약간 작다",
            FitOption::JustRight => "딱 맞는다",
            FitOption::SlightlyLarge => "약간 크다",
        }
    }

    /// Parse the wire label or an English shorthand (`small`, `fit`, `large`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "약간 작다" => Some(FitOption::SlightlySmall),
            "딱 맞는다" => Some(FitOption::JustRight),
            "약간 크다" => Some(FitOption::SlightlyLarge),
            other => match other.to_lowercase().as_str() {
                "small" => Some(FitOption::SlightlySmall),
                "fit" | "just-right" => Some(FitOption::JustRight),
                "large" => Some(FitOption::SlightlyLarge),
                _ => None,
            },
        }
    }
}

impl fmt::Display for FitOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unsaved fit comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentDraft {
    /// Local path or URL of the chosen image.
    pub image_uri: Option<String>,
    /// Garment subtype, free text (e.g. "반팔").
    pub category: String,
    pub size: Option<String>,
    pub fit: Option<FitOption>,
    pub brand: String,
    pub item_name: String,
    pub text: String,
}

impl CommentDraft {
    pub fn new() -> Self {
        Self {
            category: DEFAULT_COMMENT_CATEGORY.to_string(),
            ..Self::default()
        }
    }

    /// Check required fields in screen order: image, product name, text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_uri.as_deref().map_or(true, |uri| uri.trim().is_empty()) {
            return Err(ValidationError::ImageNotSelected);
        }
        if self.item_name.trim().is_empty() {
            return Err(ValidationError::ProductNameMissing);
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::CommentMissing);
        }
        Ok(())
    }

    /// Last path segment of the image URI.
    pub fn image_name(&self) -> Option<&str> {
        self.image_uri
            .as_deref()
            .and_then(|uri| uri.rsplit(['/', '\\']).next())
            .filter(|name| !name.is_empty())
    }

    /// Body of the save-comment request.
    pub fn to_saved(&self, user_email: &UserEmail, image_name: impl Into<String>) -> SavedComment {
        SavedComment {
            user_email: user_email.clone(),
            image: image_name.into(),
            comment: self.text.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            size: self.size.clone(),
            fit: self.fit,
            item_name: self.item_name.clone(),
        }
    }
}

/// Body of `POST /api/fit_comment/save_comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedComment {
    #[serde(rename = "userEmail")]
    pub user_email: UserEmail,
    #[serde(rename = "fitStorageImg")]
    pub image: String,
    #[serde(rename = "fitComment")]
    pub comment: String,
    #[serde(rename = "itemType")]
    pub category: String,
    #[serde(rename = "itemBrand")]
    pub brand: String,
    #[serde(rename = "itemSize")]
    pub size: Option<String>,
    #[serde(rename = "option")]
    pub fit: Option<FitOption>,
    #[serde(rename = "itemName")]
    pub item_name: String,
}
