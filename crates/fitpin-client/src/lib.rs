//! FitPin client: backend API, session context and screen controllers.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitpin_client::{ApiConfig, FitpinApi, ProductPage, SessionContext};
//! use fitpin_commerce::ItemKey;
//!
//! let api = FitpinApi::connect(ApiConfig::default())?;
//! let session = SessionContext::signed_in("me@fitpin.kr");
//!
//! let page = ProductPage::load(&api, &session, ItemKey::new(12)).await?;
//! println!("recommended: {:?}", page.recommended());
//! ```

pub mod api;
pub mod config;
mod error;
pub mod screens;
pub mod session;

pub use api::{BodyForm, FitStorageImage, FitpinApi, ImageBytes};
pub use config::{ApiConfig, DEFAULT_DATA_URL};
pub use error::ClientError;
pub use screens::{CommentBoard, CommentWriter, ProductPage, TryOnPreview};
pub use session::SessionContext;
