//! Garment size tables and label lookup.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Order in which size buttons are shown. Labels not listed here keep their
/// catalog order and come last.
pub const DISPLAY_ORDER: [&str; 7] = ["S", "M", "L", "XL", "2XL", "3XL", "Free"];

/// Which size table a product uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKind {
    Top,
    Bottom,
}

impl SizeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeKind::Top => "top",
            SizeKind::Bottom => "bottom",
        }
    }

    /// Column headers of the size chart, label column first.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            SizeKind::Top => &["Size", "Height", "Shoulder", "Chest", "Sleeve"],
            SizeKind::Bottom => &[
                "Size",
                "Height",
                "Front Rise",
                "Waist",
                "Hip",
                "Thigh",
                "Hem Width",
            ],
        }
    }
}

/// Common view over top and bottom size entries.
pub trait SizeEntry {
    /// Size label, e.g. "M" or "2XL".
    fn label(&self) -> &str;

    /// Garment length.
    fn height(&self) -> f64;

    /// Named measurements in chart column order (label excluded).
    fn measurements(&self) -> Vec<(&'static str, f64)>;
}

/// One row of a top-garment size table, in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSizeEntry {
    #[serde(rename = "itemSize")]
    pub label: String,
    #[serde(rename = "itemHeight")]
    pub height: f64,
    #[serde(rename = "itemShoulder")]
    pub shoulder: f64,
    #[serde(rename = "itemChest")]
    pub chest: f64,
    #[serde(rename = "itemSleeve")]
    pub sleeve: f64,
}

impl TopSizeEntry {
    pub fn new(label: impl Into<String>, height: f64, shoulder: f64, chest: f64, sleeve: f64) -> Self {
        Self {
            label: label.into(),
            height,
            shoulder,
            chest,
            sleeve,
        }
    }
}

impl SizeEntry for TopSizeEntry {
    fn label(&self) -> &str {
        &self.label
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn measurements(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("shoulder", self.shoulder),
            ("chest", self.chest),
            ("sleeve", self.sleeve),
        ]
    }
}

/// One row of a bottom-garment size table, in centimeters.
///
/// The item-info endpoint spells two keys in lowercase (`frontrise`,
/// `itemhipWidth`); both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomSizeEntry {
    #[serde(rename = "itemSize")]
    pub label: String,
    #[serde(rename = "itemHeight")]
    pub height: f64,
    #[serde(rename = "frontRise", alias = "frontrise")]
    pub front_rise: f64,
    #[serde(rename = "itemWaists")]
    pub waist: f64,
    #[serde(rename = "itemHipWidth", alias = "itemhipWidth")]
    pub hip_width: f64,
    #[serde(rename = "itemThighs")]
    pub thigh: f64,
    #[serde(rename = "itemHemWidth")]
    pub hem_width: f64,
}

impl BottomSizeEntry {
    pub fn new(
        label: impl Into<String>,
        height: f64,
        front_rise: f64,
        waist: f64,
        hip_width: f64,
        thigh: f64,
        hem_width: f64,
    ) -> Self {
        Self {
            label: label.into(),
            height,
            front_rise,
            waist,
            hip_width,
            thigh,
            hem_width,
        }
    }
}

impl SizeEntry for BottomSizeEntry {
    fn label(&self) -> &str {
        &self.label
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn measurements(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("height", self.height),
            ("front_rise", self.front_rise),
            ("waist", self.waist),
            ("hip_width", self.hip_width),
            ("thigh", self.thigh),
            ("hem_width", self.hem_width),
        ]
    }
}

/// Find the entry with exactly `label` (case-sensitive). First match wins.
pub fn lookup<'a, E: SizeEntry>(entries: &'a [E], label: &str) -> Option<&'a E> {
    entries.iter().find(|entry| entry.label() == label)
}

/// Entries in size-button order. The sort is stable, so unknown labels
/// keep their relative catalog order.
pub fn sort_for_display<E: SizeEntry>(entries: &[E]) -> Vec<&E> {
    let mut sorted: Vec<&E> = entries.iter().collect();
    sorted.sort_by_key(|entry| display_rank(entry.label()));
    sorted
}

fn display_rank(label: &str) -> usize {
    DISPLAY_ORDER
        .iter()
        .position(|known| *known == label)
        .unwrap_or(DISPLAY_ORDER.len())
}

/// The active size table of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "sizes", rename_all = "lowercase")]
pub enum SizeCatalog {
    Top(Vec<TopSizeEntry>),
    Bottom(Vec<BottomSizeEntry>),
}

impl SizeCatalog {
    pub fn kind(&self) -> SizeKind {
        match self {
            SizeCatalog::Top(_) => SizeKind::Top,
            SizeCatalog::Bottom(_) => SizeKind::Bottom,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SizeCatalog::Top(entries) => entries.len(),
            SizeCatalog::Bottom(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels in catalog order.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            SizeCatalog::Top(entries) => entries.iter().map(|e| e.label()).collect(),
            SizeCatalog::Bottom(entries) => entries.iter().map(|e| e.label()).collect(),
        }
    }

    /// Labels in size-button order.
    pub fn display_labels(&self) -> Vec<&str> {
        match self {
            SizeCatalog::Top(entries) => sort_for_display(entries).into_iter().map(|e| e.label()).collect(),
            SizeCatalog::Bottom(entries) => {
                sort_for_display(entries).into_iter().map(|e| e.label()).collect()
            }
        }
    }

    /// Look up an entry by label.
    pub fn lookup(&self, label: &str) -> Option<SizeEntryRef<'_>> {
        match self {
            SizeCatalog::Top(entries) => lookup(entries, label).map(SizeEntryRef::Top),
            SizeCatalog::Bottom(entries) => lookup(entries, label).map(SizeEntryRef::Bottom),
        }
    }

    /// First entry in catalog order.
    pub fn first(&self) -> Option<SizeEntryRef<'_>> {
        match self {
            SizeCatalog::Top(entries) => entries.first().map(SizeEntryRef::Top),
            SizeCatalog::Bottom(entries) => entries.first().map(SizeEntryRef::Bottom),
        }
    }

    /// Check that labels are unique and every measurement is a finite,
    /// non-negative number.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match self {
            SizeCatalog::Top(entries) => validate_entries(entries),
            SizeCatalog::Bottom(entries) => validate_entries(entries),
        }
    }
}

fn validate_entries<E: SizeEntry>(entries: &[E]) -> Result<(), CommerceError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.label()) {
            return Err(CommerceError::DuplicateSize(entry.label().to_string()));
        }
        for (field, value) in entry.measurements() {
            if !value.is_finite() || value < 0.0 {
                return Err(CommerceError::InvalidMeasurement {
                    label: entry.label().to_string(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// A borrowed size entry tagged with its garment kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "size", rename_all = "lowercase")]
pub enum SizeEntryRef<'a> {
    Top(&'a TopSizeEntry),
    Bottom(&'a BottomSizeEntry),
}

impl<'a> SizeEntryRef<'a> {
    pub fn label(&self) -> &'a str {
        match self {
            SizeEntryRef::Top(entry) => &entry.label,
            SizeEntryRef::Bottom(entry) => &entry.label,
        }
    }

    pub fn kind(&self) -> SizeKind {
        match self {
            SizeEntryRef::Top(_) => SizeKind::Top,
            SizeEntryRef::Bottom(_) => SizeKind::Bottom,
        }
    }

    pub fn measurements(&self) -> Vec<(&'static str, f64)> {
        match self {
            SizeEntryRef::Top(entry) => entry.measurements(),
            SizeEntryRef::Bottom(entry) => entry.measurements(),
        }
    }

    /// True when both refer to the same entry in memory.
    pub fn same_entry(&self, other: &SizeEntryRef<'_>) -> bool {
        match (self, other) {
            (SizeEntryRef::Top(a), SizeEntryRef::Top(b)) => std::ptr::eq(*a, *b),
            (SizeEntryRef::Bottom(a), SizeEntryRef::Bottom(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tops() -> Vec<TopSizeEntry> {
        vec![
            TopSizeEntry::new("L", 170.0, 46.0, 100.0, 61.0),
            TopSizeEntry::new("S", 160.0, 40.0, 90.0, 55.0),
            TopSizeEntry::new("M", 165.0, 43.0, 95.0, 58.0),
        ]
    }

    #[test]
    fn test_lookup_exact_match() {
        let entries = tops();
        let found = lookup(&entries, "M").unwrap();
        assert_eq!(found.chest, 95.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let entries = tops();
        assert!(lookup(&entries, "m").is_none());
        assert!(lookup(&entries, "XL").is_none());
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let entries = vec![
            TopSizeEntry::new("M", 1.0, 1.0, 1.0, 1.0),
            TopSizeEntry::new("M", 2.0, 2.0, 2.0, 2.0),
        ];
        assert_eq!(lookup(&entries, "M").unwrap().height, 1.0);
    }

    #[test]
    fn test_lookup_returns_same_reference() {
        let catalog = SizeCatalog::Top(tops());
        let a = catalog.lookup("S").unwrap();
        let b = catalog.lookup("S").unwrap();
        assert!(a.same_entry(&b));
    }

    #[test]
    fn test_lookup_empty_catalog() {
        let catalog = SizeCatalog::Bottom(Vec::new());
        assert!(catalog.lookup("S").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_display_order() {
        let mut entries = tops();
        entries.push(TopSizeEntry::new("Free", 1.0, 1.0, 1.0, 1.0));
        entries.insert(0, TopSizeEntry::new("Kids", 1.0, 1.0, 1.0, 1.0));
        entries.push(TopSizeEntry::new("2XL", 1.0, 1.0, 1.0, 1.0));

        let labels: Vec<&str> = sort_for_display(&entries).iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec!["S", "M", "L", "2XL", "Free", "Kids"]);
    }

    #[test]
    fn test_bottom_entry_accepts_lowercase_keys() {
        let json = r#"{
            "itemSize": "M",
            "itemHeight": 100,
            "frontrise": 28,
            "itemWaists": 40,
            "itemhipWidth": 52,
            "itemThighs": 31,
            "itemHemWidth": 20
        }"#;
        let entry: BottomSizeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.front_rise, 28.0);
        assert_eq!(entry.hip_width, 52.0);
    }

    #[test]
    fn test_entry_rejects_non_numeric_measurement() {
        let json = r#"{"itemSize":"M","itemHeight":"tall","itemShoulder":1,"itemChest":1,"itemSleeve":1}"#;
        assert!(serde_json::from_str::<TopSizeEntry>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_bad_values() {
        let dup = SizeCatalog::Top(vec![
            TopSizeEntry::new("M", 1.0, 1.0, 1.0, 1.0),
            TopSizeEntry::new("M", 1.0, 1.0, 1.0, 1.0),
        ]);
        assert_eq!(dup.validate(), Err(CommerceError::DuplicateSize("M".into())));

        let negative = SizeCatalog::Top(vec![TopSizeEntry::new("S", 1.0, -2.0, 1.0, 1.0)]);
        assert!(matches!(
            negative.validate(),
            Err(CommerceError::InvalidMeasurement { field: "shoulder", .. })
        ));

        assert!(SizeCatalog::Top(tops()).validate().is_ok());
    }
}
