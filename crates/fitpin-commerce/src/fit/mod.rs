//! Body measurements and the best-fit size recommender.

mod body;
mod recommend;

pub use body::*;
pub use recommend::*;
