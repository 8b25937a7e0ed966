//! Order draft built by "buy now".

use crate::catalog::{ItemInfo, SizeKind};
use crate::error::CommerceError;
use crate::ids::ItemKey;
use crate::money::Won;
use crate::tailoring::{BottomOffsets, Quantity, TailoringOffsets, TopOffsets};
use serde::{Deserialize, Serialize};

/// Tailoring offsets of a top garment as the order screen expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTailoring {
    #[serde(rename = "itemHeight")]
    pub length: u32,
    #[serde(rename = "itemShoulder")]
    pub shoulder: u32,
    #[serde(rename = "itemChest")]
    pub chest: u32,
    #[serde(rename = "itemSleeve")]
    pub sleeve: u32,
}

impl From<&TopOffsets> for TopTailoring {
    fn from(offsets: &TopOffsets) -> Self {
        Self {
            length: offsets.length.get(),
            shoulder: offsets.shoulder.get(),
            chest: offsets.chest.get(),
            sleeve: offsets.sleeve.get(),
        }
    }
}

/// Tailoring offsets of a bottom garment. The order screen uses the same
/// lowercase spellings as the item-info endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottomTailoring {
    #[serde(rename = "itemHeight")]
    pub length: u32,
    #[serde(rename = "frontrise")]
    pub front_rise: u32,
    #[serde(rename = "itemWaists")]
    pub waist: u32,
    #[serde(rename = "itemhipWidth")]
    pub hip_width: u32,
    #[serde(rename = "itemThighs")]
    pub thigh: u32,
    #[serde(rename = "itemHemWidth")]
    pub hem_width: u32,
}

impl From<&BottomOffsets> for BottomTailoring {
    fn from(offsets: &BottomOffsets) -> Self {
        Self {
            length: offsets.length.get(),
            front_rise: offsets.front_rise.get(),
            waist: offsets.waist.get(),
            hip_width: offsets.hip_width.get(),
            thigh: offsets.thigh.get(),
            hem_width: offsets.hem_width.get(),
        }
    }
}

/// One line of an order draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "itemKey")]
    pub item_key: ItemKey,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "itemSize")]
    pub size: String,
    /// Base unit price, without tailoring.
    #[serde(rename = "itemPrice")]
    pub price: Won,
    #[serde(rename = "qty")]
    pub quantity: Quantity,
    #[serde(rename = "pitStatus")]
    pub tailoring: bool,
    /// Tailoring price, zero when tailoring is off.
    #[serde(rename = "pitPrice")]
    pub tailoring_price: Won,
    #[serde(rename = "pitTopInfo")]
    pub top_tailoring: Option<TopTailoring>,
    #[serde(rename = "pitBottomInfo")]
    pub bottom_tailoring: Option<BottomTailoring>,
}

impl OrderLine {
    /// Build a line. `offsets` is `Some` when tailoring is requested.
    pub fn build(
        item: &ItemInfo,
        size: &str,
        quantity: Quantity,
        offsets: Option<&TailoringOffsets>,
    ) -> Self {
        let kind = item.size_kind();
        Self {
            item_key: item.item_key,
            item_name: item.name.clone(),
            size: size.to_string(),
            price: item.price,
            quantity,
            tailoring: offsets.is_some(),
            tailoring_price: if offsets.is_some() {
                item.tailoring_price
            } else {
                Won::ZERO
            },
            top_tailoring: offsets
                .filter(|_| kind == SizeKind::Top)
                .map(|o| TopTailoring::from(&o.top)),
            bottom_tailoring: offsets
                .filter(|_| kind == SizeKind::Bottom)
                .map(|o| BottomTailoring::from(&o.bottom)),
        }
    }

    /// `(price + tailoring price) * quantity`.
    pub fn total(&self) -> Result<Won, CommerceError> {
        self.price
            .checked_add(self.tailoring_price)?
            .checked_mul(self.quantity.get())
    }
}

/// Lines passed to the order screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn single(line: OrderLine) -> Self {
        Self { lines: vec![line] }
    }

    /// Sum of line totals.
    pub fn total(&self) -> Result<Won, CommerceError> {
        self.lines
            .iter()
            .try_fold(Won::ZERO, |acc, line| acc.checked_add(line.total()?))
    }
}
