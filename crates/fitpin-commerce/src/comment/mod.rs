//! Fit comments: short reviews tied to a garment the user tried on.

mod draft;
mod fit_comment;

pub use draft::*;
pub use fit_comment::*;
