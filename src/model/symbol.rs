//! Free-standing symbols, images and icons

use crate::model::element::{Element, ItemBase};
use crate::model::property::{Pid, PropertyValue};
use crate::model::sym::SymId;
use crate::model::types::SizeF;
use serde::{Deserialize, Serialize};

/// Shared state of symbol-like elements; they may nest further symbols and images
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BSymbol {
    pub item: ItemBase,
    pub system_flag: bool,
    pub children: Vec<Element>,
}

/// Glyph from the engraving font
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Symbol {
    pub base: BSymbol,
    pub sym: SymId,
    /// Engraving font the glyph is taken from; `None` for the score font
    pub font: Option<String>,
}

impl_item!(Symbol, base.item);

/// Character from an arbitrary text font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FSymbol {
    pub base: BSymbol,
    pub font_family: String,
    pub font_size: f64,
    /// Unicode code point
    pub code: i32,
}

impl Default for FSymbol {
    fn default() -> Self {
        FSymbol {
            base: BSymbol::default(),
            font_family: "FreeSerif".into(),
            font_size: 12.0,
            code: 0,
        }
    }
}

impl_item!(FSymbol, base.item);

/// Embedded or linked picture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub base: BSymbol,
    /// Path inside the score archive
    pub store_path: String,
    /// Original file path the picture was linked from
    pub link_path: String,
    /// Size is in spatium units rather than millimetres
    pub size_is_spatium: bool,
}

impl Default for Image {
    fn default() -> Self {
        Image {
            base: BSymbol::default(),
            store_path: String::new(),
            link_path: String::new(),
            size_is_spatium: true,
        }
    }
}

impl_item!(Image, base.item);

impl Image {
    pub fn size(&self) -> SizeF {
        match self.base.item.props.get(Pid::Size) {
            Some(PropertyValue::Size(s)) => *s,
            _ => SizeF::default(),
        }
    }

    pub fn autoscale(&self) -> bool {
        self.base.item.props.get(Pid::Autoscale).and_then(|v| v.as_bool()).unwrap_or(true)
    }

    pub fn lock_aspect_ratio(&self) -> bool {
        self.base
            .item
            .props
            .get(Pid::LockAspectRatio)
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DividerType {
    #[default]
    Left,
    Right,
}

/// Symbol drawn between systems
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemDivider {
    pub symbol: Symbol,
    pub divider_type: DividerType,
}

impl_item!(SystemDivider, symbol.base.item);

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum ActionIconType {
    #[default]
    Undefined = 0,
    Acciaccatura = 1,
    Appoggiatura = 2,
    Grace4 = 3,
    Grace16 = 4,
    Grace32 = 5,
    Grace8After = 6,
    Grace16After = 7,
    Grace32After = 8,
    BeamStart = 9,
    BeamMid = 10,
    BeamNone = 11,
    BeamBegin32 = 12,
    BeamBegin64 = 13,
    BeamAuto = 14,
    VFrame = 15,
    HFrame = 16,
    TFrame = 17,
    FFrame = 18,
    MeasureFrame = 19,
    Standard = 20,
}

impl ActionIconType {
    pub fn from_int(v: i32) -> Self {
        use ActionIconType::*;
        match v {
            1 => Acciaccatura,
            2 => Appoggiatura,
            3 => Grace4,
            4 => Grace16,
            5 => Grace32,
            6 => Grace8After,
            7 => Grace16After,
            8 => Grace32After,
            9 => BeamStart,
            10 => BeamMid,
            11 => BeamNone,
            12 => BeamBegin32,
            13 => BeamBegin64,
            14 => BeamAuto,
            15 => VFrame,
            16 => HFrame,
            17 => TFrame,
            18 => FFrame,
            19 => MeasureFrame,
            20 => Standard,
            _ => Undefined,
        }
    }
}

/// Palette icon standing for an editing action
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionIcon {
    pub item: ItemBase,
    pub action: String,
    pub action_type: ActionIconType,
}

impl_item!(ActionIcon, item);
