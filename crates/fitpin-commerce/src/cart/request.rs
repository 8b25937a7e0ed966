//! Body of the cart-store request and its outcome.

use crate::catalog::{ItemCategory, ItemInfo, SizeKind};
use crate::error::CommerceError;
use crate::ids::{ItemKey, UserEmail};
use crate::money::Won;
use crate::tailoring::{Quantity, TailoringOffsets};
use serde::{Deserialize, Serialize};

/// Message the cart endpoint returns when the item was stored.
///
/// The endpoint answers 200 for both success and failure; this literal is
/// the only success signal it gives.
pub const CART_CONFIRMATION: &str = "장바구니에 상품이 성공적으로 추가되었습니다.";

/// Tailoring request attached to a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TailoringRequest {
    Top {
        #[serde(rename = "itemType")]
        item_type: ItemCategory,
        #[serde(rename = "itemSize")]
        size: String,
        #[serde(rename = "itemHeight")]
        length: u32,
        #[serde(rename = "itemShoulder")]
        shoulder: u32,
        #[serde(rename = "itemChest")]
        chest: u32,
        #[serde(rename = "itemSleeve")]
        sleeve: u32,
    },
    Bottom {
        #[serde(rename = "itemType")]
        item_type: ItemCategory,
        #[serde(rename = "itemSize")]
        size: String,
        #[serde(rename = "itemHeight")]
        length: u32,
        #[serde(rename = "frontRise")]
        front_rise: u32,
        #[serde(rename = "itemWaists")]
        waist: u32,
        #[serde(rename = "itemHipWidth")]
        hip_width: u32,
        #[serde(rename = "itemThighs")]
        thigh: u32,
        #[serde(rename = "itemHemWidth")]
        hem_width: u32,
    },
}

impl TailoringRequest {
    /// Build from the counters of `kind`, the item's active size table.
    pub fn new(
        kind: SizeKind,
        category: ItemCategory,
        size: &str,
        offsets: &TailoringOffsets,
    ) -> Self {
        match kind {
            SizeKind::Top => TailoringRequest::Top {
                item_type: category,
                size: size.to_string(),
                length: offsets.top.length.get(),
                shoulder: offsets.top.shoulder.get(),
                chest: offsets.top.chest.get(),
                sleeve: offsets.top.sleeve.get(),
            },
            SizeKind::Bottom => TailoringRequest::Bottom {
                item_type: category,
                size: size.to_string(),
                length: offsets.bottom.length.get(),
                front_rise: offsets.bottom.front_rise.get(),
                waist: offsets.bottom.waist.get(),
                hip_width: offsets.bottom.hip_width.get(),
                thigh: offsets.bottom.thigh.get(),
                hem_width: offsets.bottom.hem_width.get(),
            },
        }
    }
}

/// Body of `POST /api/cart/store`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRequest {
    #[serde(rename = "itemKey")]
    pub item_key: ItemKey,
    #[serde(rename = "userEmail")]
    pub user_email: UserEmail,
    #[serde(rename = "itemImgName")]
    pub image_name: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "itemSize")]
    pub size: String,
    #[serde(rename = "itemType")]
    pub item_type: ItemCategory,
    /// Unit price including tailoring when requested.
    #[serde(rename = "itemPrice")]
    pub price: Won,
    #[serde(rename = "qty")]
    pub quantity: Quantity,
    #[serde(rename = "pitStatus")]
    pub tailoring: bool,
    #[serde(rename = "pitPrice")]
    pub tailoring_price: Won,
    #[serde(rename = "pitItemCart")]
    pub tailoring_request: Option<TailoringRequest>,
}

impl CartRequest {
    /// Assemble a cart line. `offsets` is `Some` when tailoring is requested.
    pub fn build(
        item: &ItemInfo,
        user_email: &UserEmail,
        size: &str,
        quantity: Quantity,
        offsets: Option<&TailoringOffsets>,
    ) -> Result<Self, CommerceError> {
        let tailoring = offsets.is_some();
        Ok(Self {
            item_key: item.item_key,
            user_email: user_email.clone(),
            image_name: item.primary_image().unwrap_or_default().to_string(),
            item_name: item.name.clone(),
            size: size.to_string(),
            item_type: item.category,
            price: item.unit_price(tailoring)?,
            quantity,
            tailoring,
            tailoring_price: item.tailoring_price,
            tailoring_request: offsets.map(|offsets| {
                TailoringRequest::new(item.size_kind(), item.category, size, offsets)
            }),
        })
    }
}

/// Result reported by the cart endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CartOutcome {
    /// The item is in the cart.
    Added,
    /// The backend refused; carries its message.
    Rejected(String),
}

impl CartOutcome {
    /// Classify the `message` field of the cart response.
    pub fn from_message(message: &str) -> Self {
        if message.trim() == CART_CONFIRMATION {
            CartOutcome::Added
        } else {
            CartOutcome::Rejected(message.to_string())
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, CartOutcome::Added)
    }
}
