//! Element kinds, the shared item base and the closed `Element` enum

use crate::model::beam::{Beam, Tuplet};
use crate::model::chord::{
    Accidental, Arpeggio, Articulation, Bend, Breath, Chord, ChordLine, Fermata, Note, NoteDot, Rest, Stem, StemSlash,
    Tremolo, TremoloBar,
};
use crate::model::harmony::{FretDiagram, Harmony};
use crate::model::line::{Glissando, GradualTempoChange, Hairpin, LineSegment, TextLineBase};
use crate::model::measure::{BoxElement, LayoutBreak, TBox};
use crate::model::property::{Pid, PropertyFlags, PropertyMap, PropertyValue};
use crate::model::signature::{Clef, KeySig, TimeSig};
use crate::model::staff::{Ambitus, BagpipeEmbellishment, BarLine, Bracket, StaffState, StaffTypeChange};
use crate::model::style::{self, Style};
use crate::model::symbol::{ActionIcon, FSymbol, Image, Symbol, SystemDivider};
use crate::model::text::{
    Dynamic, FiguredBass, InstrumentChange, Jump, Lyrics, Marker, PlayTechAnnotation, StaffTextBase, TempoText,
    TextBase,
};
use crate::model::types::{Color, PointF, VOICES};
use serde::{Deserialize, Serialize};

macro_rules! element_types {
    ($($ty:ident => $name:literal,)*) => {
        /// Kind of a document element
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum ElementType {
            #[default]
            Invalid,
            $($ty,)*
        }

        impl ElementType {
            /// Tag name the element is written under
            pub fn name(self) -> &'static str {
                match self {
                    ElementType::Invalid => "Invalid",
                    $(ElementType::$ty => $name,)*
                }
            }

            /// Element kind for a tag name
            pub fn from_name(name: &str) -> Option<ElementType> {
                match name {
                    $($name => Some(ElementType::$ty),)*
                    "Hairpin" => Some(ElementType::Hairpin),
                    _ => None,
                }
            }
        }
    };
}

element_types! {
    Text => "Text",
    TempoText => "Tempo",
    StaffText => "StaffText",
    SystemText => "SystemText",
    Sticking => "Sticking",
    PlayTechAnnotation => "PlayTechAnnotation",
    RehearsalMark => "RehearsalMark",
    InstrumentChange => "InstrumentChange",
    Dynamic => "Dynamic",
    Harmony => "Harmony",
    FiguredBass => "FiguredBass",
    Marker => "Marker",
    Jump => "Jump",
    MeasureNumber => "MeasureNumber",
    MMRestRange => "MMRestRange",
    Fingering => "Fingering",
    Lyrics => "Lyrics",
    Symbol => "Symbol",
    FSymbol => "FSymbol",
    Image => "Image",
    SystemDivider => "SystemDivider",
    ActionIcon => "ActionIcon",
    Chord => "Chord",
    Rest => "Rest",
    Note => "Note",
    NoteDot => "NoteDot",
    Accidental => "Accidental",
    Stem => "Stem",
    Hook => "Hook",
    StemSlash => "StemSlash",
    Arpeggio => "Arpeggio",
    Tremolo => "Tremolo",
    ChordLine => "ChordLine",
    Articulation => "Articulation",
    Fermata => "Fermata",
    Breath => "Breath",
    Bend => "Bend",
    TremoloBar => "TremoloBar",
    Beam => "Beam",
    Tuplet => "Tuplet",
    Hairpin => "HairPin",
    Glissando => "Glissando",
    GradualTempoChange => "GradualTempoChange",
    TextLine => "TextLine",
    LineSegment => "LineSegment",
    FretDiagram => "FretDiagram",
    KeySig => "KeySig",
    TimeSig => "TimeSig",
    Clef => "Clef",
    StaffState => "StaffState",
    Ambitus => "Ambitus",
    BarLine => "BarLine",
    Bracket => "Bracket",
    BagpipeEmbellishment => "BagpipeEmbellishment",
    LayoutBreak => "LayoutBreak",
    StaffTypeChange => "StaffTypeChange",
    HBox => "HBox",
    VBox => "VBox",
    TBox => "TBox",
    FBox => "FBox",
}

impl ElementType {
    /// Kinds whose extent runs between two endpoints
    pub fn is_spanner(self) -> bool {
        matches!(
            self,
            ElementType::Hairpin | ElementType::Glissando | ElementType::GradualTempoChange | ElementType::TextLine
        )
    }

    /// Kinds that are only read as part of their owner, never on their own
    pub fn is_owned_part(self) -> bool {
        matches!(self, ElementType::LineSegment)
    }
}

/// Properties every element carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    pub element_type: ElementType,
    /// `staff * VOICES + voice`
    pub track: i32,
    pub visible: bool,
    pub color: Color,
    /// Manual offset from the layout position, in absolute units
    pub offset: PointF,
    pub autoplace: bool,
    pub eid: Option<String>,
    pub props: PropertyMap,
}

impl Default for ItemBase {
    fn default() -> Self {
        ItemBase::new(ElementType::Invalid)
    }
}

impl ItemBase {
    pub fn new(element_type: ElementType) -> Self {
        let mut props = PropertyMap::default();
        for (pid, _) in style::styled_properties(element_type) {
            props.set_flags(*pid, PropertyFlags::Styled);
        }
        ItemBase {
            element_type,
            track: 0,
            visible: true,
            color: Color::BLACK,
            offset: PointF::default(),
            autoplace: true,
            eid: None,
            props,
        }
    }

    pub fn staff_idx(&self) -> i32 {
        self.track / VOICES as i32
    }

    pub fn voice(&self) -> i32 {
        self.track % VOICES as i32
    }

    pub fn is_styled(&self, pid: Pid) -> bool {
        self.props.is_styled(pid)
    }

    pub fn set_property_flags(&mut self, pid: Pid, flags: PropertyFlags) {
        self.props.set_flags(pid, flags);
    }

    /// Explicit value if one was read, else the style sheet value for styled slots
    pub fn property(&self, pid: Pid, style: &Style) -> Option<PropertyValue> {
        if let Some(v) = self.props.get(pid) {
            return Some(v.clone());
        }
        style::style_for(self.element_type, pid).map(|sid| style.value(sid))
    }
}

/// Access to the shared base of an element struct
pub trait EngravingItem: Default {
    fn item(&self) -> &ItemBase;
    fn item_mut(&mut self) -> &mut ItemBase;

    /// Empty element of the given kind
    fn create(element_type: ElementType) -> Self {
        let mut e = Self::default();
        *e.item_mut() = ItemBase::new(element_type);
        e
    }
}

macro_rules! elements {
    ($($variant:ident($payload:ty),)*) => {
        /// Any element the dispatcher can decode
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum Element {
            $($variant(Box<$payload>),)*
        }

        impl Element {
            /// Empty element for a kind; `None` for kinds that only exist inside an owner
            pub fn create(element_type: ElementType) -> Option<Element> {
                match element_type {
                    $(ElementType::$variant => Some(Element::$variant(Box::new(<$payload>::create(element_type)))),)*
                    _ => None,
                }
            }

            pub fn element_type(&self) -> ElementType {
                match self {
                    $(Element::$variant(_) => ElementType::$variant,)*
                }
            }

            pub fn item(&self) -> &ItemBase {
                match self {
                    $(Element::$variant(e) => e.item(),)*
                }
            }

            pub fn item_mut(&mut self) -> &mut ItemBase {
                match self {
                    $(Element::$variant(e) => e.item_mut(),)*
                }
            }
        }
    };
}

elements! {
    Text(TextBase),
    TempoText(TempoText),
    StaffText(StaffTextBase),
    SystemText(StaffTextBase),
    Sticking(TextBase),
    PlayTechAnnotation(PlayTechAnnotation),
    RehearsalMark(TextBase),
    InstrumentChange(InstrumentChange),
    Dynamic(Dynamic),
    Harmony(Harmony),
    FiguredBass(FiguredBass),
    Marker(Marker),
    Jump(Jump),
    MeasureNumber(TextBase),
    MMRestRange(TextBase),
    Fingering(TextBase),
    Lyrics(Lyrics),
    Symbol(Symbol),
    FSymbol(FSymbol),
    Image(Image),
    SystemDivider(SystemDivider),
    ActionIcon(ActionIcon),
    Chord(Chord),
    Rest(Rest),
    Note(Note),
    NoteDot(NoteDot),
    Accidental(Accidental),
    Stem(Stem),
    Hook(Symbol),
    StemSlash(StemSlash),
    Arpeggio(Arpeggio),
    Tremolo(Tremolo),
    ChordLine(ChordLine),
    Articulation(Articulation),
    Fermata(Fermata),
    Breath(Breath),
    Bend(Bend),
    TremoloBar(TremoloBar),
    Beam(Beam),
    Tuplet(Tuplet),
    Hairpin(Hairpin),
    Glissando(Glissando),
    GradualTempoChange(GradualTempoChange),
    TextLine(TextLineBase),
    LineSegment(LineSegment),
    FretDiagram(FretDiagram),
    KeySig(KeySig),
    TimeSig(TimeSig),
    Clef(Clef),
    StaffState(StaffState),
    Ambitus(Ambitus),
    BarLine(BarLine),
    Bracket(Bracket),
    BagpipeEmbellishment(BagpipeEmbellishment),
    LayoutBreak(LayoutBreak),
    StaffTypeChange(StaffTypeChange),
    HBox(BoxElement),
    VBox(BoxElement),
    TBox(TBox),
    FBox(BoxElement),
}

impl Element {
    pub fn track(&self) -> i32 {
        self.item().track
    }

    pub fn set_track(&mut self, track: i32) {
        self.item_mut().track = track;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_parts() {
        assert!(ElementType::LineSegment.is_owned_part());
        assert!(!ElementType::Hairpin.is_owned_part());
        assert!(!ElementType::Rest.is_owned_part());
    }

    #[test]
    fn test_names() {
        assert_eq!(ElementType::from_name("HairPin"), Some(ElementType::Hairpin));
        assert_eq!(ElementType::from_name("Hairpin"), Some(ElementType::Hairpin));
        assert_eq!(ElementType::from_name("Tempo"), Some(ElementType::TempoText));
        assert_eq!(ElementType::from_name("Measure"), None);
        assert_eq!(ElementType::Rest.name(), "Rest");
    }

    #[test]
    fn test_create_sets_kind_and_style_flags() {
        let e = Element::create(ElementType::Sticking).unwrap();
        assert_eq!(e.element_type(), ElementType::Sticking);
        assert_eq!(e.item().element_type, ElementType::Sticking);
        assert!(e.item().is_styled(Pid::FontFace));

        let hook = Element::create(ElementType::Hook).unwrap();
        assert_eq!(hook.element_type(), ElementType::Hook);
        assert!(Element::create(ElementType::Invalid).is_none());
    }

    #[test]
    fn test_track_split() {
        let mut item = ItemBase::new(ElementType::Chord);
        item.track = 6;
        assert_eq!(item.staff_idx(), 1);
        assert_eq!(item.voice(), 2);
    }

    #[test]
    fn test_property_falls_back_to_style() {
        let style = Style::default();
        let mut item = ItemBase::new(ElementType::Hairpin);
        assert_eq!(
            item.property(Pid::HairpinHeight, &style),
            Some(PropertyValue::Spatium(1.15))
        );
        item.props.set(Pid::HairpinHeight, PropertyValue::Spatium(2.0));
        assert_eq!(item.property(Pid::HairpinHeight, &style), Some(PropertyValue::Spatium(2.0)));
        assert_eq!(item.props.flags(Pid::HairpinHeight), PropertyFlags::Unstyled);
    }
}
