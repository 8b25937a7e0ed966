//! Cart submission payloads.

mod request;

pub use request::*;
