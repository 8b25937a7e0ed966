//! Per-measurement tailoring offsets.
//!
//! A user asks for alterations as a number of steps on top of the selected
//! size. Each measurement has its own counter; counters never go negative.

use crate::catalog::SizeKind;
use crate::tailoring::Counter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Adjustable measurement of a top garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopField {
    Length,
    Shoulder,
    Chest,
    Sleeve,
}

impl TopField {
    pub const ALL: [TopField; 4] = [
        TopField::Length,
        TopField::Shoulder,
        TopField::Chest,
        TopField::Sleeve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopField::Length => "length",
            TopField::Shoulder => "shoulder",
            TopField::Chest => "chest",
            TopField::Sleeve => "sleeve",
        }
    }
}

/// Adjustable measurement of a bottom garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomField {
    Length,
    FrontRise,
    Waist,
    HipWidth,
    Thigh,
    HemWidth,
}

impl BottomField {
    pub const ALL: [BottomField; 6] = [
        BottomField::Length,
        BottomField::FrontRise,
        BottomField::Waist,
        BottomField::HipWidth,
        BottomField::Thigh,
        BottomField::HemWidth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BottomField::Length => "length",
            BottomField::FrontRise => "front-rise",
            BottomField::Waist => "waist",
            BottomField::HipWidth => "hip",
            BottomField::Thigh => "thigh",
            BottomField::HemWidth => "hem",
        }
    }
}

/// A tailoring field of either garment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailoringField {
    Top(TopField),
    Bottom(BottomField),
}

impl TailoringField {
    /// Parse a field name for the given garment kind.
    pub fn parse(kind: SizeKind, name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");
        match kind {
            SizeKind::Top => TopField::ALL
                .into_iter()
                .find(|field| field.as_str() == name)
                .map(TailoringField::Top),
            SizeKind::Bottom => BottomField::ALL
                .into_iter()
                .find(|field| field.as_str() == name)
                .map(TailoringField::Bottom),
        }
    }

    pub fn kind(&self) -> SizeKind {
        match self {
            TailoringField::Top(_) => SizeKind::Top,
            TailoringField::Bottom(_) => SizeKind::Bottom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TailoringField::Top(field) => field.as_str(),
            TailoringField::Bottom(field) => field.as_str(),
        }
    }
}

impl fmt::Display for TailoringField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind().as_str(), self.as_str())
    }
}

/// Offsets for a top garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopOffsets {
    pub length: Counter,
    pub shoulder: Counter,
    pub chest: Counter,
    pub sleeve: Counter,
}

impl TopOffsets {
    pub fn counter_mut(&mut self, field: TopField) -> &mut Counter {
        match field {
            TopField::Length => &mut self.length,
            TopField::Shoulder => &mut self.shoulder,
            TopField::Chest => &mut self.chest,
            TopField::Sleeve => &mut self.sleeve,
        }
    }

    pub fn get(&self, field: TopField) -> u32 {
        match field {
            TopField::Length => self.length.get(),
            TopField::Shoulder => self.shoulder.get(),
            TopField::Chest => self.chest.get(),
            TopField::Sleeve => self.sleeve.get(),
        }
    }
}

/// Offsets for a bottom garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BottomOffsets {
    pub length: Counter,
    pub front_rise: Counter,
    pub waist: Counter,
    pub hip_width: Counter,
    pub thigh: Counter,
    pub hem_width: Counter,
}

impl BottomOffsets {
    pub fn counter_mut(&mut self, field: BottomField) -> &mut Counter {
        match field {
            BottomField::Length => &mut self.length,
            BottomField::FrontRise => &mut self.front_rise,
            BottomField::Waist => &mut self.waist,
            BottomField::HipWidth => &mut self.hip_width,
            BottomField::Thigh => &mut self.thigh,
            BottomField::HemWidth => &mut self.hem_width,
        }
    }

    pub fn get(&self, field: BottomField) -> u32 {
        match field {
            BottomField::Length => self.length.get(),
            BottomField::FrontRise => self.front_rise.get(),
            BottomField::Waist => self.waist.get(),
            BottomField::HipWidth => self.hip_width.get(),
            BottomField::Thigh => self.thigh.get(),
            BottomField::HemWidth => self.hem_width.get(),
        }
    }
}

/// All tailoring counters of the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TailoringOffsets {
    pub top: TopOffsets,
    pub bottom: BottomOffsets,
}

impl TailoringOffsets {
    pub fn increment(&mut self, field: TailoringField) {
        self.counter_mut(field).increment();
    }

    /// Step down, stopping at zero.
    pub fn decrement(&mut self, field: TailoringField) {
        self.counter_mut(field).decrement();
    }

    /// Step up `steps` times at once.
    pub fn add(&mut self, field: TailoringField, steps: u32) {
        self.counter_mut(field).add(steps);
    }

    pub fn get(&self, field: TailoringField) -> u32 {
        match field {
            TailoringField::Top(f) => self.top.get(f),
            TailoringField::Bottom(f) => self.bottom.get(f),
        }
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn counter_mut(&mut self, field: TailoringField) -> &mut Counter {
        match field {
            TailoringField::Top(f) => self.top.counter_mut(f),
            TailoringField::Bottom(f) => self.bottom.counter_mut(f),
        }
    }
}
