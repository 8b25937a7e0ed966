//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in fitting-room operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Size label not present in the product's catalog.
    #[error("Size not found: {0}")]
    SizeNotFound(String),

    /// Size selection is locked while tailoring is enabled.
    #[error("Size selection is locked while tailoring is enabled")]
    SelectionLocked,

    /// A garment measurement is not a finite, non-negative number.
    #[error("Invalid measurement {field} for size {label}: {value}")]
    InvalidMeasurement {
        label: String,
        field: &'static str,
        value: f64,
    },

    /// Size labels must be unique within one catalog.
    #[error("Duplicate size label: {0}")]
    DuplicateSize(String),

    /// Unknown item category string.
    #[error("Unknown item category: {0}")]
    UnknownCategory(String),

    /// Product has no image names.
    #[error("Item {0} has no images")]
    MissingImage(i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,

    /// A tailoring field of the other garment kind.
    #[error("{field} cannot be tailored on a {kind} size table")]
    FieldKindMismatch {
        field: &'static str,
        kind: &'static str,
    },

    /// Validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A user-facing validation failure that blocks the current action.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// No size was selected before adding to cart or purchasing.
    #[error("Please select a size")]
    SizeNotSelected,

    /// No image was chosen for a fit comment.
    #[error("Please choose an image")]
    ImageNotSelected,

    /// The product name field is empty.
    #[error("Please enter the product name")]
    ProductNameMissing,

    /// The comment text is empty.
    #[error("Please write a comment")]
    CommentMissing,

    /// The session has no signed-in user.
    #[error("Please sign in first")]
    NotSignedIn,

    /// Try-on needs the user's height on record.
    #[error("Body height is missing from the session")]
    HeightMissing,
}
