//! Item info as served by the item-info endpoint.

use crate::catalog::{BottomSizeEntry, SizeCatalog, SizeKind, TopSizeEntry};
use crate::error::CommerceError;
use crate::ids::ItemKey;
use crate::money::Won;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Garment category. The backend uses the Korean names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum ItemCategory {
    #[default]
    Top,
    Bottom,
    Outer,
    Suit,
}

impl ItemCategory {
    /// Every category, in comment-board section order.
    pub const ALL: [ItemCategory; 4] = [
        ItemCategory::Top,
        ItemCategory::Bottom,
        ItemCategory::Outer,
        ItemCategory::Suit,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Top => "상의",
            ItemCategory::Bottom => "하의",
            ItemCategory::Outer => "아우터",
            ItemCategory::Suit => "정장",
        }
    }

    /// Parse either the wire name or the English name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "상의" => Some(ItemCategory::Top),
            "하의" => Some(ItemCategory::Bottom),
            "아우터" => Some(ItemCategory::Outer),
            "정장" => Some(ItemCategory::Suit),
            other => match other.to_lowercase().as_str() {
                "top" => Some(ItemCategory::Top),
                "bottom" => Some(ItemCategory::Bottom),
                "outer" => Some(ItemCategory::Outer),
                "suit" => Some(ItemCategory::Suit),
                _ => None,
            },
        }
    }

    /// Size table used by garments of this category.
    pub fn size_kind(&self) -> SizeKind {
        match self {
            ItemCategory::Bottom => SizeKind::Bottom,
            ItemCategory::Top | ItemCategory::Outer | ItemCategory::Suit => SizeKind::Top,
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ItemCategory {
    type Error = CommerceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(CommerceError::UnknownCategory(value))
    }
}

impl From<ItemCategory> for String {
    fn from(category: ItemCategory) -> Self {
        category.as_str().to_string()
    }
}

/// Product detail shown on the product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    #[serde(rename = "itemKey")]
    pub item_key: ItemKey,
    #[serde(rename = "itemName")]
    pub name: String,
    #[serde(rename = "itemBrand")]
    pub brand: String,
    #[serde(rename = "itemType")]
    pub category: ItemCategory,
    #[serde(rename = "itemStyle", default, deserialize_with = "null_as_default")]
    pub style: String,
    #[serde(rename = "itemPrice")]
    pub price: Won,
    #[serde(rename = "itemContent", default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(rename = "itemTopInfo", default, deserialize_with = "null_as_default")]
    pub top_sizes: Vec<TopSizeEntry>,
    #[serde(rename = "itemBottomInfo", default, deserialize_with = "null_as_default")]
    pub bottom_sizes: Vec<BottomSizeEntry>,
    #[serde(rename = "itemImgName", default, deserialize_with = "null_as_default")]
    pub image_names: Vec<String>,
    /// Price of the tailoring service for this item.
    #[serde(rename = "pitPrice", default, deserialize_with = "null_as_default")]
    pub tailoring_price: Won,
}

impl ItemInfo {
    /// Garment kind of the active size table.
    ///
    /// The category decides, unless its table is empty and the other one is
    /// not. Size chart, counters and tailoring payloads all follow this.
    pub fn size_kind(&self) -> SizeKind {
        let preferred = self.category.size_kind();
        let (preferred_empty, other_empty) = match preferred {
            SizeKind::Top => (self.top_sizes.is_empty(), self.bottom_sizes.is_empty()),
            SizeKind::Bottom => (self.bottom_sizes.is_empty(), self.top_sizes.is_empty()),
        };
        if preferred_empty && !other_empty {
            match preferred {
                SizeKind::Top => SizeKind::Bottom,
                SizeKind::Bottom => SizeKind::Top,
            }
        } else {
            preferred
        }
    }

    /// The size table that applies to this item, see [`size_kind`](Self::size_kind).
    pub fn size_catalog(&self) -> SizeCatalog {
        let kind = self.size_kind();
        if kind != self.category.size_kind() {
            tracing::warn!(
                item_key = %self.item_key,
                category = %self.category,
                "size table does not match category, using the populated one"
            );
        }
        match kind {
            SizeKind::Top => SizeCatalog::Top(self.top_sizes.clone()),
            SizeKind::Bottom => SizeCatalog::Bottom(self.bottom_sizes.clone()),
        }
    }

    /// File name of the main product image.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_names.first().map(String::as_str)
    }

    /// Like [`primary_image`](Self::primary_image) but an error when absent.
    pub fn require_primary_image(&self) -> Result<&str, CommerceError> {
        self.primary_image()
            .ok_or(CommerceError::MissingImage(self.item_key.get()))
    }

    /// Unit price, including tailoring when requested.
    pub fn unit_price(&self, tailoring: bool) -> Result<Won, CommerceError> {
        if tailoring {
            self.price.checked_add(self.tailoring_price)
        } else {
            Ok(self.price)
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_ITEM: &str = r#"{
        "itemKey": 12,
        "itemName": "Oxford Shirt",
        "itemBrand": "FitPin",
        "itemType": "상의",
        "itemStyle": "casual",
        "itemPrice": 39000,
        "itemContent": "Cotton oxford shirt",
        "itemTopInfo": [
            {"itemSize": "M", "itemHeight": 70, "itemShoulder": 45, "itemArm": 60, "itemChest": 52, "itemSleeve": 60}
        ],
        "itemBottomInfo": null,
        "itemImgName": ["shirt.jpg", "shirt-back.jpg"]
    }"#;

    #[test]
    fn test_decode_top_item() {
        let item: ItemInfo = serde_json::from_str(TOP_ITEM).unwrap();
        assert_eq!(item.item_key, ItemKey::new(12));
        assert_eq!(item.category, ItemCategory::Top);
        assert_eq!(item.price, Won::new(39_000));
        assert_eq!(item.tailoring_price, Won::ZERO);
        assert!(item.bottom_sizes.is_empty());
        assert_eq!(item.primary_image(), Some("shirt.jpg"));

        let catalog = item.size_catalog();
        assert_eq!(catalog.kind(), SizeKind::Top);
        assert_eq!(catalog.labels(), vec!["M"]);
    }

    #[test]
    fn test_catalog_falls_back_to_populated_table() {
        let mut item: ItemInfo = serde_json::from_str(TOP_ITEM).unwrap();
        item.category = ItemCategory::Bottom;
        assert_eq!(item.size_catalog().kind(), SizeKind::Top);

        item.top_sizes.clear();
        let catalog = item.size_catalog();
        assert_eq!(catalog.kind(), SizeKind::Bottom);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_size_kind_matches_catalog() {
        let mut item: ItemInfo = serde_json::from_str(TOP_ITEM).unwrap();
        assert_eq!(item.size_kind(), SizeKind::Top);

        item.bottom_sizes = vec![BottomSizeEntry::new("M", 100.0, 28.0, 40.0, 52.0, 31.0, 20.0)];
        item.top_sizes.clear();
        assert_eq!(item.size_kind(), SizeKind::Bottom);
        assert_eq!(item.size_kind(), item.size_catalog().kind());

        item.bottom_sizes.clear();
        assert_eq!(item.size_kind(), SizeKind::Top);
    }

    #[test]
    fn test_unit_price_with_tailoring() {
        let mut item: ItemInfo = serde_json::from_str(TOP_ITEM).unwrap();
        item.tailoring_price = Won::new(5_000);
        assert_eq!(item.unit_price(false).unwrap(), Won::new(39_000));
        assert_eq!(item.unit_price(true).unwrap(), Won::new(44_000));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(ItemCategory::parse("하의"), Some(ItemCategory::Bottom));
        assert_eq!(ItemCategory::parse("Outer"), Some(ItemCategory::Outer));
        assert_eq!(ItemCategory::parse("hat"), None);
        assert_eq!(ItemCategory::Suit.size_kind(), SizeKind::Top);
    }

    #[test]
    fn test_unknown_category_fails_decode() {
        let json = TOP_ITEM.replace("상의", "모자");
        assert!(serde_json::from_str::<ItemInfo>(&json).is_err());
    }

    #[test]
    fn test_missing_image() {
        let mut item: ItemInfo = serde_json::from_str(TOP_ITEM).unwrap();
        item.image_names.clear();
        assert_eq!(
            item.require_primary_image(),
            Err(CommerceError::MissingImage(12))
        );
    }
}
