//! Style sheet defaults and the styled-property tables of each element kind

use crate::model::element::ElementType;
use crate::model::property::{Pid, PropertyValue};
use crate::model::types::{Align, DirectionV, Placement, PointF, DEFAULT_SPATIUM};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

macro_rules! sids {
    ($($sid:ident => $name:literal,)*) => {
        /// Style sheet entry
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Sid {
            $($sid,)*
        }

        impl Sid {
            pub const ALL: &'static [Sid] = &[$(Sid::$sid,)*];

            /// Tag name inside `<Style>`
            pub fn name(self) -> &'static str {
                match self {
                    $(Sid::$sid => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Sid> {
                match name {
                    $($name => Some(Sid::$sid),)*
                    _ => None,
                }
            }
        }
    };
}

sids! {
    Spatium => "Spatium",
    KeysigAccidentalDistance => "keysigAccidentalDistance",
    DividerLeftSym => "dividerLeftSym",
    DividerRightSym => "dividerRightSym",
    ConcertPitch => "concertPitch",

    DefaultFontFace => "defaultFontFace",
    DefaultFontSize => "defaultFontSize",
    DefaultFontStyle => "defaultFontStyle",
    DefaultAlign => "defaultAlign",

    LyricsPlacement => "lyricsPlacement",
    LyricsPosAbove => "lyricsPosAbove",
    LyricsPosBelow => "lyricsPosBelow",
    HarmonyPlacement => "harmonyPlacement",
    ChordSymbolPosAbove => "chordSymbolAPosAbove",
    DynamicsPlacement => "dynamicsPlacement",
    StaffTextPlacement => "staffTextPlacement",
    TempoPlacement => "tempoPlacement",

    TupletDirection => "tupletDirection",
    TupletNumberType => "tupletNumberType",
    TupletBracketType => "tupletBracketType",
    TupletBracketWidth => "tupletBracketWidth",
    TupletFontFace => "tupletFontFace",
    TupletFontSize => "tupletFontSize",
    TupletFontStyle => "tupletFontStyle",
    TupletAlign => "tupletAlign",

    BeamNoSlope => "beamNoSlope",
    StemWidth => "stemWidth",

    HairpinHeight => "hairpinHeight",
    HairpinContHeight => "hairpinContHeight",
    HairpinLineWidth => "hairpinLineWidth",
    HairpinPlacement => "hairpinPlacement",
    HairpinFontFace => "hairpinFontFace",
    HairpinFontSize => "hairpinFontSize",
    HairpinFontStyle => "hairpinFontStyle",

    GlissandoLineWidth => "glissandoLineWidth",
    GlissandoFontFace => "glissandoFontFace",
    GlissandoFontSize => "glissandoFontSize",
    GlissandoFontStyle => "glissandoFontStyle",

    BendLineWidth => "bendLineWidth",
    BendFontFace => "bendFontFace",
    BendFontSize => "bendFontSize",
    BendFontStyle => "bendFontStyle",

    TextLinePlacement => "textLinePlacement",
    TextLineLineWidth => "textLineLineWidth",
    TempoChangePlacement => "tempoChangePlacement",
    TempoChangeLineWidth => "tempoChangeLineWidth",

    SystemFrameDistance => "systemFrameDistance",
    FrameSystemDistance => "frameSystemDistance",
}

fn default_value(sid: Sid) -> PropertyValue {
    use PropertyValue as V;
    match sid {
        Sid::Spatium => V::Real(DEFAULT_SPATIUM),
        Sid::KeysigAccidentalDistance => V::Spatium(0.3),
        Sid::DividerLeftSym => V::String("systemDivider".into()),
        Sid::DividerRightSym => V::String("systemDivider".into()),
        Sid::ConcertPitch => V::Bool(false),

        Sid::DefaultFontFace
        | Sid::TupletFontFace
        | Sid::HairpinFontFace
        | Sid::GlissandoFontFace
        | Sid::BendFontFace => V::String("Edwin".into()),
        Sid::DefaultFontSize => V::Real(10.0),
        Sid::TupletFontSize => V::Real(9.0),
        Sid::HairpinFontSize | Sid::GlissandoFontSize | Sid::BendFontSize => V::Real(8.0),
        Sid::DefaultFontStyle | Sid::HairpinFontStyle | Sid::GlissandoFontStyle | Sid::BendFontStyle => {
            V::Int(0)
        }
        Sid::TupletFontStyle => V::Int(2),
        Sid::DefaultAlign => V::Align(Align::default()),
        Sid::TupletAlign => V::Align(Align::CENTER),

        Sid::LyricsPlacement => V::Placement(Placement::Below),
        Sid::LyricsPosAbove => V::Point(PointF::new(0.0, -2.0)),
        Sid::LyricsPosBelow => V::Point(PointF::new(0.0, 3.0)),
        Sid::HarmonyPlacement => V::Placement(Placement::Above),
        Sid::ChordSymbolPosAbove => V::Point(PointF::new(0.0, -2.5)),
        Sid::DynamicsPlacement => V::Placement(Placement::Below),
        Sid::StaffTextPlacement | Sid::TempoPlacement => V::Placement(Placement::Above),

        Sid::TupletDirection => V::Direction(DirectionV::Auto),
        Sid::TupletNumberType => V::Int(0),
        Sid::TupletBracketType => V::Int(0),
        Sid::TupletBracketWidth => V::Spatium(0.1),

        Sid::BeamNoSlope => V::Bool(false),
        Sid::StemWidth => V::Spatium(0.1),

        Sid::HairpinHeight => V::Spatium(1.15),
        Sid::HairpinContHeight => V::Spatium(0.5),
        Sid::HairpinLineWidth => V::Spatium(0.12),
        Sid::HairpinPlacement => V::Placement(Placement::Below),

        Sid::GlissandoLineWidth => V::Spatium(0.15),
        Sid::BendLineWidth => V::Spatium(0.15),

        Sid::TextLinePlacement | Sid::TempoChangePlacement => V::Placement(Placement::Above),
        Sid::TextLineLineWidth | Sid::TempoChangeLineWidth => V::Spatium(0.15),

        Sid::SystemFrameDistance => V::Spatium(7.0),
        Sid::FrameSystemDistance => V::Spatium(7.0),
    }
}

/// Document-wide style sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    values: BTreeMap<Sid, PropertyValue>,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            values: Sid::ALL.iter().map(|&sid| (sid, default_value(sid))).collect(),
        }
    }
}

impl Style {
    pub fn value(&self, sid: Sid) -> PropertyValue {
        self.values.get(&sid).cloned().unwrap_or_else(|| default_value(sid))
    }

    pub fn set(&mut self, sid: Sid, value: PropertyValue) {
        self.values.insert(sid, value);
    }

    /// Size of one staff space in internal units
    pub fn spatium(&self) -> f64 {
        self.value(Sid::Spatium).as_real().unwrap_or(DEFAULT_SPATIUM)
    }

    pub fn set_spatium(&mut self, spatium: f64) {
        self.set(Sid::Spatium, PropertyValue::Real(spatium));
    }

    /// String-valued entry
    pub fn style_st(&self, sid: Sid) -> String {
        self.value(sid).as_str().unwrap_or_default().to_string()
    }

    /// Length-valued entry in spatium units
    pub fn style_s(&self, sid: Sid) -> f64 {
        self.value(sid).as_real().unwrap_or(0.0)
    }
}

const TEXT_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
];

const STAFF_TEXT_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
    (Pid::Placement, Sid::StaffTextPlacement),
];

const TEMPO_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
    (Pid::Placement, Sid::TempoPlacement),
];

const DYNAMIC_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
    (Pid::Placement, Sid::DynamicsPlacement),
];

const HARMONY_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
    (Pid::Placement, Sid::HarmonyPlacement),
    (Pid::PosAbove, Sid::ChordSymbolPosAbove),
];

const LYRICS_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::DefaultFontFace),
    (Pid::FontSize, Sid::DefaultFontSize),
    (Pid::FontStyle, Sid::DefaultFontStyle),
    (Pid::Align, Sid::DefaultAlign),
    (Pid::Placement, Sid::LyricsPlacement),
    (Pid::Offset, Sid::LyricsPosBelow),
];

const TUPLET_STYLED: &[(Pid, Sid)] = &[
    (Pid::Direction, Sid::TupletDirection),
    (Pid::TupletNumberType, Sid::TupletNumberType),
    (Pid::TupletBracketType, Sid::TupletBracketType),
    (Pid::LineWidth, Sid::TupletBracketWidth),
    (Pid::FontFace, Sid::TupletFontFace),
    (Pid::FontSize, Sid::TupletFontSize),
    (Pid::FontStyle, Sid::TupletFontStyle),
    (Pid::Align, Sid::TupletAlign),
];

const BEAM_STYLED: &[(Pid, Sid)] = &[(Pid::BeamNoSlope, Sid::BeamNoSlope)];

const STEM_STYLED: &[(Pid, Sid)] = &[(Pid::LineWidth, Sid::StemWidth)];

const HAIRPIN_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::HairpinFontFace),
    (Pid::FontSize, Sid::HairpinFontSize),
    (Pid::FontStyle, Sid::HairpinFontStyle),
    (Pid::LineWidth, Sid::HairpinLineWidth),
    (Pid::HairpinHeight, Sid::HairpinHeight),
    (Pid::HairpinContHeight, Sid::HairpinContHeight),
    (Pid::Placement, Sid::HairpinPlacement),
];

const GLISSANDO_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::GlissandoFontFace),
    (Pid::FontSize, Sid::GlissandoFontSize),
    (Pid::FontStyle, Sid::GlissandoFontStyle),
    (Pid::LineWidth, Sid::GlissandoLineWidth),
];

const BEND_STYLED: &[(Pid, Sid)] = &[
    (Pid::FontFace, Sid::BendFontFace),
    (Pid::FontSize, Sid::BendFontSize),
    (Pid::FontStyle, Sid::BendFontStyle),
    (Pid::LineWidth, Sid::BendLineWidth),
];

const TEXT_LINE_STYLED: &[(Pid, Sid)] = &[
    (Pid::Placement, Sid::TextLinePlacement),
    (Pid::LineWidth, Sid::TextLineLineWidth),
];

const TEMPO_CHANGE_STYLED: &[(Pid, Sid)] = &[
    (Pid::Placement, Sid::TempoChangePlacement),
    (Pid::LineWidth, Sid::TempoChangeLineWidth),
];

const VBOX_STYLED: &[(Pid, Sid)] = &[
    (Pid::TopGap, Sid::SystemFrameDistance),
    (Pid::BottomGap, Sid::FrameSystemDistance),
];

/// Property slots of an element kind that inherit from the style sheet,
/// in the order the styled-property lookup tries them
pub fn styled_properties(ty: ElementType) -> &'static [(Pid, Sid)] {
    match ty {
        ElementType::Text
        | ElementType::Sticking
        | ElementType::RehearsalMark
        | ElementType::InstrumentChange
        | ElementType::FiguredBass
        | ElementType::Marker
        | ElementType::Jump
        | ElementType::MeasureNumber
        | ElementType::MMRestRange
        | ElementType::Fingering => TEXT_STYLED,
        ElementType::StaffText | ElementType::SystemText | ElementType::PlayTechAnnotation => {
            STAFF_TEXT_STYLED
        }
        ElementType::TempoText => TEMPO_STYLED,
        ElementType::Dynamic => DYNAMIC_STYLED,
        ElementType::Harmony => HARMONY_STYLED,
        ElementType::Lyrics => LYRICS_STYLED,
        ElementType::Tuplet => TUPLET_STYLED,
        ElementType::Beam => BEAM_STYLED,
        ElementType::Stem => STEM_STYLED,
        ElementType::Hairpin => HAIRPIN_STYLED,
        ElementType::Glissando => GLISSANDO_STYLED,
        ElementType::Bend => BEND_STYLED,
        ElementType::TextLine => TEXT_LINE_STYLED,
        ElementType::GradualTempoChange => TEMPO_CHANGE_STYLED,
        ElementType::VBox => VBOX_STYLED,
        _ => &[],
    }
}

/// Style entry a slot of `ty` inherits from, if any
pub fn style_for(ty: ElementType, pid: Pid) -> Option<Sid> {
    styled_properties(ty)
        .iter()
        .find(|(p, _)| *p == pid)
        .map(|(_, sid)| *sid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spatium() {
        let style = Style::default();
        assert!((style.spatium() - DEFAULT_SPATIUM).abs() < 1e-9);
    }

    #[test]
    fn test_names_round_trip_through_lookup() {
        for &sid in Sid::ALL {
            assert_eq!(Sid::from_name(sid.name()), Some(sid));
        }
    }

    #[test]
    fn test_styled_tables() {
        assert_eq!(style_for(ElementType::Hairpin, Pid::LineWidth), Some(Sid::HairpinLineWidth));
        assert_eq!(style_for(ElementType::Chord, Pid::LineWidth), None);
        assert_eq!(style_for(ElementType::VBox, Pid::TopGap), Some(Sid::SystemFrameDistance));
    }
}
