//! Fitting-room domain types and logic for FitPin.
//!
//! This crate provides the pieces of the product page and comment screens
//! that do not talk to the network:
//!
//! - **Catalog**: item info, top/bottom size tables, label lookup
//! - **Fit**: user body profile and the best-fit size recommender
//! - **Tailoring**: per-measurement adjustment counters and quantity
//! - **Cart / Checkout**: cart submission and purchase payloads
//! - **Comment**: fit comments and the comment draft
//!
//! # Example
//!
//! ```rust
//! use fitpin_commerce::prelude::*;
//!
//! let sizes = vec![
//!     TopSizeEntry::new("S", 160.0, 40.0, 90.0, 55.0),
//!     TopSizeEntry::new("M", 165.0, 43.0, 95.0, 58.0),
//!     TopSizeEntry::new("L", 170.0, 46.0, 100.0, 61.0),
//! ];
//! let catalog = SizeCatalog::Top(sizes);
//!
//! let body = UserBodyProfile {
//!     torso_length: 166.0,
//!     shoulder_width: 44.0,
//!     arm_length: 96.0,
//!     ..UserBodyProfile::default()
//! };
//!
//! let best = recommend(&catalog, &body).unwrap();
//! assert_eq!(best.label(), "M");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod comment;
pub mod fit;
pub mod tailoring;

pub use error::{CommerceError, ValidationError};
pub use ids::*;
pub use money::Won;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::Won;

    // Catalog
    pub use crate::catalog::{
        lookup, sort_for_display, BottomSizeEntry, ItemCategory, ItemInfo, SizeCatalog,
        SizeEntry, SizeEntryRef, SizeKind, TopSizeEntry,
    };

    // Fit
    pub use crate::fit::{recommend, recommend_bottom, recommend_top, top_deviation, UserBodyProfile};

    // Tailoring
    pub use crate::tailoring::{
        BottomField, BottomOffsets, Counter, Quantity, TailoringField, TailoringOffsets,
        TopField, TopOffsets,
    };

    // Cart / Checkout
    pub use crate::cart::{CartOutcome, CartRequest, TailoringRequest, CART_CONFIRMATION};
    pub use crate::checkout::{OrderDraft, OrderLine};

    // Comment
    pub use crate::comment::{CommentDraft, FitComment, FitOption, SavedComment};
}
