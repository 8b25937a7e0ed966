//! Catalog types: item info and size tables.

mod item;
mod size;

pub use item::*;
pub use size::*;
