//! In-memory document model
//!
//! Plain data: every entity is a struct owning its children, and every
//! entity kind that the reader can decode generically is a variant of
//! [`Element`]. Nothing here knows about markup.

/// Implement [`EngravingItem`] for a struct whose `ItemBase` lives at the given field path
macro_rules! impl_item {
    ($ty:ty, $($field:ident).+) => {
        impl $crate::model::element::EngravingItem for $ty {
            fn item(&self) -> &$crate::model::element::ItemBase {
                &self.$($field).+
            }

            fn item_mut(&mut self) -> &mut $crate::model::element::ItemBase {
                &mut self.$($field).+
            }
        }
    };
}

pub mod beam;
pub mod chord;
pub mod element;
pub mod harmony;
pub mod line;
pub mod measure;
pub mod property;
pub mod score;
pub mod signature;
pub mod staff;
pub mod style;
pub mod sym;
pub mod symbol;
pub mod text;
pub mod types;

pub use beam::{Beam, BeamFragment, Tuplet};
pub use chord::{
    Accidental, AccidentalBracket, AccidentalRole, Arpeggio, ArpeggioType, Articulation, ArticulationTextType, BeamMode,
    Bend, Breath, Chord, ChordLine, ChordLineType, ChordRest, Fermata, Note, NoteDot, NoteEvent, NoteType, PathElement,
    PitchValue, PlayEventType, Rest, Stem, StemSlash, Tremolo, TremoloBar, TremoloType,
};
pub use element::{Element, ElementType, EngravingItem, ItemBase};
pub use harmony::{Barre, FretDiagram, FretDot, FretDotType, FretMarkerType, HDegree, HDegreeType, Harmony, NoteCaseType};
pub use line::{
    ChangeMethod, Glissando, GlissandoType, GradualTempoChange, Hairpin, HairpinType, LineAnchor, LineSegment, SLine,
    SpannerData, TextLineBase,
};
pub use measure::{BoxElement, LayoutBreak, LayoutBreakType, Measure, MeasureBase, MeasureElement, TBox};
pub use property::{Pid, PropertyFlags, PropertyMap, PropertyType, PropertyValue};
pub use score::{AppVersion, Audio, MeasureNode, MscVersion, Part, Score, Staff};
pub use signature::{Clef, ClefType, CustDef, GroupNode, Groups, KeyMode, KeySig, KeySigEvent, TimeSig, TimeSigType};
pub use staff::{
    Ambitus, BagpipeEmbellishment, BarLine, BarLineType, Bracket, BracketType, Channel, Instrument, StaffState,
    StaffStateType, StaffTypeChange,
};
pub use style::{Sid, Style};
pub use sym::SymId;
pub use symbol::{ActionIcon, ActionIconType, BSymbol, DividerType, FSymbol, Image, Symbol, SystemDivider};
pub use text::{
    ChannelActions, Dynamic, DynamicRange, DynamicSpeed, FiguredBass, FiguredBassItem, InstrumentChange, Jump, Lyrics,
    LyricsSyllabic, Marker, MarkerType, PlayTechAnnotation, StaffTextBase, SwingParameters, TempoText, TextBase,
    TextStyleType,
};
pub use types::{
    Align, Color, DirectionH, DirectionV, DurationType, Fraction, Interval, LineType, Placement, PointF, SizeF,
    TDuration,
};
