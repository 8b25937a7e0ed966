//! Purchase drafts handed to the order screen.

mod order;

pub use order::*;
