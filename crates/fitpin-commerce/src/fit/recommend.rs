//! Best-fit size recommendation.
//!
//! Tops and bottoms use different policies:
//!
//! - **Tops** pick the entry with the smallest summed absolute deviation
//!   between garment and body measurements. Ties go to the entry that comes
//!   first in the catalog.
//! - **Bottoms** pick the first entry whose length reaches the user's leg
//!   length, falling back to the last (largest) entry.

use crate::catalog::{BottomSizeEntry, SizeCatalog, SizeEntryRef, TopSizeEntry};
use crate::fit::UserBodyProfile;

/// Summed absolute deviation of a top entry from the body profile.
///
/// Chest is compared against arm length; the body profile carries no chest
/// measurement.
pub fn top_deviation(entry: &TopSizeEntry, body: &UserBodyProfile) -> f64 {
    (entry.height - body.torso_length).abs()
        + (entry.shoulder - body.shoulder_width).abs()
        + (entry.chest - body.arm_length).abs()
        + (entry.sleeve - body.arm_length).abs()
}

/// Entry with the minimum [`top_deviation`]. `None` for an empty table.
pub fn recommend_top<'a>(
    entries: &'a [TopSizeEntry],
    body: &UserBodyProfile,
) -> Option<&'a TopSizeEntry> {
    let mut best = None;
    let mut min_deviation = f64::INFINITY;
    for entry in entries {
        let deviation = top_deviation(entry, body);
        if deviation < min_deviation {
            min_deviation = deviation;
            best = Some(entry);
        }
    }
    best
}

/// First entry with `height >= leg_length`, else the last entry.
pub fn recommend_bottom<'a>(
    entries: &'a [BottomSizeEntry],
    body: &UserBodyProfile,
) -> Option<&'a BottomSizeEntry> {
    entries
        .iter()
        .find(|entry| entry.height >= body.leg_length)
        .or_else(|| entries.last())
}

/// Recommend a size from the product's active size table.
pub fn recommend<'a>(catalog: &'a SizeCatalog, body: &UserBodyProfile) -> Option<SizeEntryRef<'a>> {
    let result = match catalog {
        SizeCatalog::Top(entries) => recommend_top(entries, body).map(SizeEntryRef::Top),
        SizeCatalog::Bottom(entries) => recommend_bottom(entries, body).map(SizeEntryRef::Bottom),
    };
    tracing::debug!(
        kind = catalog.kind().as_str(),
        sizes = catalog.len(),
        recommended = result.map(|entry| entry.label()),
        "size recommendation computed"
    );
    result
}
