//! HTTP fetch layer for the FitPin backend.
//!
//! This crate provides:
//! - `FetchClient` - Fetch with per-dependency timeout and retry
//! - `Transport` - The network seam, with a `reqwest` implementation
//! - `DependencyTag` - Semantic dependency categories
//! - `FetchOutcome` - Loaded, empty or failed
//!
//! # Example
//!
//! ```rust,ignore
//! use fitpin_data::{DependencyTag, FetchClient};
//!
//! let client = FetchClient::reqwest()?;
//! let item: serde_json::Value = client
//!     .get("http://fitpitback.kro.kr:8080/api/item-info/12", DependencyTag::Catalog)
//!     .send_json()
//!     .await?;
//! ```

mod client;
mod dependency;
mod error;
mod outcome;
mod request;
mod response;
mod retry;
mod timeout;
mod transport;
mod url;

pub use client::{ClientRequestBuilder, FetchClient};
pub use dependency::DependencyTag;
pub use error::FetchError;
pub use outcome::FetchOutcome;
pub use request::{Body, Method, MultipartForm, Part, Request, RequestBuilder};
pub use response::Response;
pub use retry::{Backoff, RetryPolicy, Transient};
pub use timeout::{FetchPolicy, TimeoutConfig};
pub use transport::{ReqwestTransport, Transport};
pub use url::join_url;
