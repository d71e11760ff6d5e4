//! Property identifiers, typed values and style flags
//!
//! A property is a slot on an element that may either inherit its value from
//! the style sheet or carry an explicit override. Each `Pid` knows the tag
//! under which it is written and the type its content decodes to.

use crate::model::types::{Align, Color, DirectionH, DirectionV, LineType, Placement, PointF, SizeF};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value type of a property slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Bool,
    Int,
    Real,
    /// Length in spatium units, stored unscaled
    Spatium,
    /// Length written in spatium units and stored in absolute units
    Millimetre,
    /// Point written in spatium units and stored in absolute units
    Point,
    Size,
    String,
    Color,
    Direction,
    DirectionH,
    Placement,
    Align,
    LineType,
}

macro_rules! pids {
    ($($pid:ident => ($tag:literal, $ty:ident),)*) => {
        /// Property identifier
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Pid {
            $($pid,)*
        }

        impl Pid {
            /// Tag name the property is written under
            pub fn tag(self) -> &'static str {
                match self {
                    $(Pid::$pid => $tag,)*
                }
            }

            pub fn property_type(self) -> PropertyType {
                match self {
                    $(Pid::$pid => PropertyType::$ty,)*
                }
            }
        }
    };
}

pids! {
    Visible => ("visible", Bool),
    Color => ("color", Color),
    Offset => ("offset", Point),
    Placement => ("placement", Placement),
    Autoplace => ("autoplace", Bool),
    MinDistance => ("minDistance", Spatium),
    Z => ("z", Int),
    Play => ("play", Bool),
    Mag => ("mag", Real),
    LineWidth => ("lineWidth", Millimetre),
    LineWidthSpatium => ("lineWidth", Spatium),
    LineStyle => ("lineStyle", LineType),

    FontFace => ("family", String),
    FontSize => ("size", Real),
    FontStyle => ("fontStyle", Int),
    Align => ("align", Align),
    FrameType => ("frameType", Int),
    FrameWidth => ("frameWidth", Spatium),
    FramePadding => ("framePadding", Spatium),
    FrameRound => ("frameRound", Int),
    FrameFgColor => ("frameFgColor", Color),
    FrameBgColor => ("frameBgColor", Color),
    SizeSpatiumDependent => ("sizeIsSpatiumDependent", Bool),

    PosAbove => ("posAbove", Millimetre),
    HarmonyType => ("harmonyType", Int),
    HarmonyVoiceLiteral => ("harmonyVoiceLiteral", Bool),
    HarmonyVoicing => ("harmonyVoicing", Int),
    HarmonyDuration => ("harmonyDuration", Int),

    FretNut => ("showNut", Bool),
    Orientation => ("orientation", Int),
    FretStrings => ("strings", Int),
    FretFrets => ("frets", Int),
    FretOffset => ("fretOffset", Int),

    PlayTechType => ("playTechType", String),

    Autoscale => ("autoScale", Bool),
    Size => ("size", Size),
    LockAspectRatio => ("lockAspectRatio", Bool),

    StemDirection => ("StemDirection", Direction),
    UserLen => ("userLen", Millimetre),
    BeamNoSlope => ("noSlope", Bool),
    HeadGroup => ("head", String),
    HeadType => ("headType", String),
    HeadScheme => ("headScheme", String),
    MirrorHead => ("mirror", DirectionH),
    DotPosition => ("dotPosition", Direction),
    VeloType => ("veloType", String),

    ArticulationAnchor => ("anchor", Int),
    Direction => ("direction", Direction),
    OrnamentStyle => ("ornamentStyle", String),

    TupletNumberType => ("numberType", Int),
    TupletBracketType => ("bracketType", Int),

    TremoloStyle => ("strokeStyle", Int),

    GlissText => ("text", String),
    GlissStyle => ("glissandoStyle", String),

    TempoChangeType => ("tempoChangeType", String),
    TempoEasingMethod => ("tempoEasingMethod", String),
    TempoChangeFactor => ("tempoChangeFactor", Real),

    HairpinHeight => ("hairpinHeight", Spatium),
    HairpinContHeight => ("hairpinContHeight", Spatium),

    LineVisible => ("lineVisible", Bool),
    BeginText => ("beginText", String),
    BeginTextPlace => ("beginTextPlace", String),
    BeginHookType => ("beginHookType", Int),
    BeginHookHeight => ("beginHookHeight", Spatium),
    BeginFontFace => ("beginFontFace", String),
    BeginFontSize => ("beginFontSize", Real),
    BeginFontStyle => ("beginFontStyle", Int),
    BeginTextOffset => ("beginTextOffset", Point),
    ContinueText => ("continueText", String),
    ContinueTextPlace => ("continueTextPlace", String),
    EndText => ("endText", String),
    EndTextPlace => ("endTextPlace", String),
    EndHookType => ("endHookType", Int),
    EndHookHeight => ("endHookHeight", Spatium),
    GapBetweenTextAndLine => ("gapBetweenTextAndLine", Spatium),

    LayoutBreak => ("subtype", String),
    Pause => ("pause", Real),
    StartWithLongNames => ("startWithLongNames", Bool),
    StartWithMeasureOne => ("startWithMeasureOne", Bool),
    FirstSystemIndentation => ("firstSystemIndentation", Bool),

    TopGap => ("topGap", Millimetre),
    BottomGap => ("bottomGap", Millimetre),
}

/// Typed property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Real(f64),
    Spatium(f64),
    Millimetre(f64),
    Point(PointF),
    Size(SizeF),
    String(String),
    Color(Color),
    Direction(DirectionV),
    DirectionH(DirectionH),
    Placement(Placement),
    Align(Align),
    LineType(LineType),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v != 0),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            PropertyValue::Bool(v) => Some(*v as i32),
            _ => None,
        }
    }

    /// Any real-valued variant
    pub fn as_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(v) | PropertyValue::Spatium(v) | PropertyValue::Millimetre(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<PointF> {
        match self {
            PropertyValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_direction(&self) -> Option<DirectionV> {
        match self {
            PropertyValue::Direction(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_placement(&self) -> Option<Placement> {
        match self {
            PropertyValue::Placement(p) => Some(*p),
            _ => None,
        }
    }
}

/// Whether a property follows the style sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyFlags {
    /// The property has no style counterpart
    #[default]
    NoStyle,
    /// The value is inherited from the style sheet
    Styled,
    /// The value is an explicit override of the style sheet
    Unstyled,
}

/// Explicit property values of one element plus their style flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyMap {
    values: BTreeMap<Pid, PropertyValue>,
    flags: BTreeMap<Pid, PropertyFlags>,
}

impl PropertyMap {
    pub fn get(&self, pid: Pid) -> Option<&PropertyValue> {
        self.values.get(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.values.contains_key(&pid)
    }

    /// Store a value; a styled slot becomes an explicit override
    pub fn set(&mut self, pid: Pid, value: PropertyValue) {
        self.values.insert(pid, value);
        if self.is_styled(pid) {
            self.flags.insert(pid, PropertyFlags::Unstyled);
        }
    }

    pub fn flags(&self, pid: Pid) -> PropertyFlags {
        self.flags.get(&pid).copied().unwrap_or_default()
    }

    pub fn set_flags(&mut self, pid: Pid, flags: PropertyFlags) {
        self.flags.insert(pid, flags);
    }

    pub fn is_styled(&self, pid: Pid) -> bool {
        self.flags(pid) == PropertyFlags::Styled
    }

    pub fn values(&self) -> impl Iterator<Item = (&Pid, &PropertyValue)> {
        self.values.iter()
    }
}
