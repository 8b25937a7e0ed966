//! Tailoring adjustment counters and the purchase quantity.

mod counter;
mod offsets;

pub use counter::*;
pub use offsets::*;
