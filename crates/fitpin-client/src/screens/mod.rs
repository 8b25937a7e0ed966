//! Screen controllers. Each holds the state of one screen and talks to the
//! backend through [`FitpinApi`](crate::FitpinApi).

pub mod comments;
pub mod mypage;
pub mod product;

pub use comments::{fit_storage_urls, BoardEntry, CommentBoard, CommentWriter};
pub use mypage::{logout, withdraw};
pub use product::{ProductPage, TryOnPreview};
